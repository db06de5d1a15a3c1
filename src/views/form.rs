//! Form field extraction that keeps repeated keys.
//!
//! Query pairs come from the URI. Body pairs come from an urlencoded or multipart body;
//! the bulk actions post their repeated `id` fields either way.

use axum::{
    extract::{FromRequest, Multipart, Query, Request},
    http::{header, HeaderMap, Method},
    Form,
};

use crate::errors::AppError;
use crate::models::optional_string;

/// Query and body pairs, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    query: Vec<(String, String)>,
    body: Vec<(String, String)>,
}

impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<Vec<(String, String)>>::try_from_uri(req.uri())
            .map_err(|_| AppError::invalid_form())?;

        // `Form` falls back to the query string on GET.
        let body = if req.method() == Method::GET || req.method() == Method::HEAD {
            Vec::new()
        } else if has_content_type(req.headers(), "multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|_| AppError::invalid_form())?;
            multipart_pairs(multipart).await?
        } else if has_content_type(req.headers(), "application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|_| AppError::invalid_form())?;
            pairs
        } else {
            Vec::new()
        };

        Ok(Self { query, body })
    }
}

fn has_content_type(headers: &HeaderMap, expected: &str) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with(expected))
}

/// Text fields of a multipart body. File parts are skipped.
async fn multipart_pairs(mut multipart: Multipart) -> Result<Vec<(String, String)>, AppError> {
    let mut pairs = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::invalid_form())?
    {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field.text().await.map_err(|_| AppError::invalid_form())?;
        pairs.push((name, value));
    }
    Ok(pairs)
}

impl FormFields {
    #[cfg(test)]
    pub fn from_pairs(query: &[(&str, &str)], body: &[(&str, &str)]) -> Self {
        fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        }
        Self {
            query: owned(query),
            body: owned(body),
        }
    }

    /// First value for `key`, body before query.
    pub fn get(&self, key: &str) -> Option<&str> {
        first(&self.body, key).or_else(|| first(&self.query, key))
    }

    /// First value for `key`, or an empty string.
    pub fn value(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    pub fn query_value(&self, key: &str) -> String {
        first(&self.query, key).unwrap_or_default().to_string()
    }

    /// Every value for a repeated key, body first.
    pub fn all(&self, key: &str) -> Vec<String> {
        self.body
            .iter()
            .chain(&self.query)
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// Checkbox-style flag: true only for the literal `"true"`.
    pub fn checkbox(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }

    /// Empty values become `None`.
    pub fn optional(&self, key: &str) -> Option<String> {
        optional_string(self.get(key).unwrap_or_default())
    }
}

fn first<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
