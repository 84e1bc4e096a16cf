use std::time::Duration;

use anyhow::Context;
use serde_json::Value;

/// Client for the companion product-listing service.
pub struct CatalogClient {
    base_url: String,
    client: reqwest::Client,
}

impl CatalogClient {
    pub fn new(base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build catalog HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Fetches `/productos` and renders it as model context. Every failure is
    /// turned into a descriptive line so the chat can still answer.
    pub async fn fetch_products(&self) -> String {
        let url = format!("{}/productos", self.base_url);

        let resp = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) if e.is_connect() => {
                tracing::warn!(error = %e, url = %url, "catalog service unreachable");
                return "Error: No se pudo conectar con la API de productos".to_string();
            }
            Err(e) => {
                tracing::warn!(error = %e, url = %url, "catalog request failed");
                return format!("Error en la solicitud de productos: {e}");
            }
        };

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            tracing::warn!(status = %status, "catalog service returned error");
            return format!("Error al obtener productos: Código {}", status.as_u16());
        }

        match resp.json::<Value>().await {
            Ok(data) => format_catalog(&data),
            Err(e) => {
                tracing::warn!(error = %e, "catalog response was not JSON");
                format!("Error al obtener productos: {e}")
            }
        }
    }
}

/// Accepts `{"productos": [...]}` or a bare list. Objects render as
/// `<nombre> - $<precio>`, anything else as its plain text.
pub fn format_catalog(data: &Value) -> String {
    let products = match data {
        Value::Object(map) => match map.get("productos") {
            Some(Value::Array(items)) => items,
            _ => return "No se pudo procesar el formato de productos".to_string(),
        },
        Value::Array(items) => items,
        _ => return "No se pudo procesar el formato de productos".to_string(),
    };

    if products.is_empty() {
        return "No hay productos disponibles".to_string();
    }

    products
        .iter()
        .map(|product| match product {
            Value::Object(fields) => {
                let name = field_text(fields.get("nombre")).unwrap_or_else(|| "Sin nombre".to_string());
                let price = field_text(fields.get("precio"))
                    .unwrap_or_else(|| "Precio no disponible".to_string());
                format!("{name} - ${price}")
            }
            other => plain_text(other),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn field_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(plain_text(v)),
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_format_wrapped_list() {
        let data = json!({"productos": [
            {"nombre": "Telefono X", "precio": 299.99},
            {"nombre": "Tablet Y", "precio": 150}
        ]});
        assert_eq!(format_catalog(&data), "Telefono X - $299.99\nTablet Y - $150");
    }

    #[test]
    fn test_format_bare_list_with_missing_fields() {
        let data = json!([{"precio": "10"}, {"nombre": "Funda"}, "Cargador"]);
        assert_eq!(
            format_catalog(&data),
            "Sin nombre - $10\nFunda - $Precio no disponible\nCargador"
        );
    }

    #[test]
    fn test_format_empty_and_unknown_shapes() {
        assert_eq!(format_catalog(&json!([])), "No hay productos disponibles");
        assert_eq!(
            format_catalog(&json!({"items": []})),
            "No se pudo procesar el formato de productos"
        );
        assert_eq!(
            format_catalog(&json!("texto")),
            "No se pudo procesar el formato de productos"
        );
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_fetch_products_success() {
        let app = Router::new().route(
            "/productos",
            get(|| async { Json(json!({"productos": [{"nombre": "Telefono X", "precio": 100}]})) }),
        );
        let url = serve(app).await;

        let client = CatalogClient::new(url, Duration::from_secs(5)).unwrap();
        assert_eq!(client.fetch_products().await, "Telefono X - $100");
    }

    #[tokio::test]
    async fn test_fetch_products_non_200() {
        let app = Router::new().route(
            "/productos",
            get(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let url = serve(app).await;

        let client = CatalogClient::new(url, Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.fetch_products().await,
            "Error al obtener productos: Código 503"
        );
    }

    #[tokio::test]
    async fn test_fetch_products_unreachable() {
        // bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = CatalogClient::new(format!("http://{addr}"), Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.fetch_products().await,
            "Error: No se pudo conectar con la API de productos"
        );
    }
}
