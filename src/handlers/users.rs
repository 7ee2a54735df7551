// src/handlers/users.rs
//
// Usuarios: accesores finos sobre la colección, con la comparación de
// credenciales en texto plano que ya usa el frontend.

use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::common::error::AppError;
use crate::config::AppState;
use crate::handlers::crud::Registro;
use crate::store::coleccion;

#[derive(Debug, Deserialize)]
pub struct Credenciales {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn authenticate(
    State(app_state): State<AppState>,
    Json(credenciales): Json<Credenciales>,
) -> Result<impl IntoResponse, AppError> {
    let users: Vec<Registro> = app_state.store.load(coleccion::USERS, Vec::new()).await?;

    let user = users
        .iter()
        .find(|u| {
            u.get("usuario").and_then(Value::as_str) == Some(credenciales.username.as_str())
                && u.get("contrasena").and_then(Value::as_str)
                    == Some(credenciales.password.as_str())
        })
        .ok_or(AppError::CredencialesInvalidas)?;

    let usuario = user.get("usuario").and_then(Value::as_str).unwrap_or("");
    let frase = user
        .get("frase_bienvenida")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("¡Bienvenido, {usuario}!"));

    Ok(Json(json!({
        "user": {
            "usuario": usuario,
            "rol": user.get("rol"),
            "frase_bienvenida": frase,
        }
    })))
}

pub async fn create_user(
    State(app_state): State<AppState>,
    Json(nuevo): Json<Registro>,
) -> Result<impl IntoResponse, AppError> {
    let usuario = nuevo.get("usuario").and_then(Value::as_str).unwrap_or("");
    let contrasena = nuevo.get("contrasena").and_then(Value::as_str).unwrap_or("");
    if usuario.is_empty() || contrasena.is_empty() {
        return Err(AppError::DatoInvalido(
            "Usuario y contraseña son obligatorios.".into(),
        ));
    }

    let _guard = app_state.store.bloqueo_escritura().await;
    let mut users: Vec<Registro> = app_state.store.load(coleccion::USERS, Vec::new()).await?;
    if users
        .iter()
        .any(|u| u.get("usuario").and_then(Value::as_str) == Some(usuario))
    {
        return Err(AppError::UsuarioYaExiste);
    }

    users.push(nuevo);
    app_state.store.store(coleccion::USERS, &users).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Usuario creado exitosamente." })),
    ))
}

pub async fn update_user(
    State(app_state): State<AppState>,
    Path(username): Path<String>,
    Json(cambios): Json<Registro>,
) -> Result<impl IntoResponse, AppError> {
    let _guard = app_state.store.bloqueo_escritura().await;

    let mut users: Vec<Registro> = app_state.store.load(coleccion::USERS, Vec::new()).await?;
    let Some(user) = users
        .iter_mut()
        .find(|u| u.get("usuario").and_then(Value::as_str) == Some(username.as_str()))
    else {
        return Err(AppError::NoEncontrado("Usuario"));
    };

    for (k, v) in cambios {
        user.insert(k, v);
    }
    app_state.store.store(coleccion::USERS, &users).await?;

    Ok(Json(json!({
        "message": format!("Usuario '{username}' actualizado exitosamente.")
    })))
}

pub async fn delete_user(
    State(app_state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _guard = app_state.store.bloqueo_escritura().await;

    let mut users: Vec<Registro> = app_state.store.load(coleccion::USERS, Vec::new()).await?;
    let antes = users.len();
    users.retain(|u| u.get("usuario").and_then(Value::as_str) != Some(username.as_str()));
    if users.len() == antes {
        return Err(AppError::NoEncontrado("Usuario"));
    }
    app_state.store.store(coleccion::USERS, &users).await?;

    Ok(Json(json!({ "message": "Usuario eliminado exitosamente." })))
}
