//! Table handlers: list tables, then read/insert/update/delete on any catalog table.

use crate::dispatch::{dispatch, Operation};
use crate::error::AppError;
use crate::response::{success, success_keyed, TableList};
use crate::service::CrudService;
use crate::sql::{decode_body, parse_id, ReadQuery};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Query, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;

/// `GET /`: names of all tables, sorted.
pub async fn list_tables(State(state): State<AppState>) -> impl IntoResponse {
    success(TableList {
        tables: state.catalog.table_names(),
    })
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Every path other than `/`: resolved against the catalog by the dispatcher.
pub async fn table_request(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let route = dispatch(&state.catalog, &method, uri.path())?;
    let table = route.table;
    let executor = state.executor.as_ref();
    tracing::debug!(table = %table.name, op = ?route.op, "dispatch");

    let response = match route.op {
        Operation::Read { id } => {
            let params: HashMap<String, String> = Query::try_from_uri(&uri).map(|Query(p)| p).unwrap_or_default();
            let read = ReadQuery::from_request(table, id, &params)?;
            let records = CrudService::read(executor, table, &read).await?;
            success(records).into_response()
        }
        Operation::Insert => {
            let fields = decode_body(&read_body(body)?)?;
            let (pk, id) = CrudService::insert(executor, table, &fields).await?;
            success_keyed(pk, id).into_response()
        }
        Operation::Update { id } => {
            let id = parse_id(table, id)?;
            let fields = decode_body(&read_body(body)?)?;
            let updated = CrudService::update(executor, table, id, &fields).await?;
            success_keyed("updated", updated).into_response()
        }
        Operation::Delete { id } => {
            let id = parse_id(table, id)?;
            let deleted = CrudService::delete(executor, table, id).await?;
            success_keyed("deleted", deleted).into_response()
        }
    };
    Ok(response)
}

/// Body extraction failures become envelope errors: 413 past the limit, 500 otherwise.
fn read_body(body: Result<Bytes, BytesRejection>) -> Result<Bytes, AppError> {
    body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::BodyTooLarge
        } else {
            AppError::MalformedBody(rejection.body_text())
        }
    })
}
