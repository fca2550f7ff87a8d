//! # Firestore REST client
//!
//! [`FirestoreClient`] implements [`store::DocumentStore`] on top of the Firestore v1
//! REST API, using the encoding in [`crate::wire`].
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list | `GET {root}/{collection}?pageSize=N[&pageToken=T]`, repeated until the reply has no `nextPageToken`; a token handed back twice in a row is a `Decode` error |
//! | create | `POST {root}/{collection}` with `{fields}`; the key is chosen by the server |
//! | delete | `DELETE {root}/{collection}/{id}`; deleting a missing document succeeds |
//!
//! `{root}` is `{endpoint}/v1/projects/{project_id}/databases/{database}/documents`.
//! Path segments are percent-encoded. The API key, when configured, goes in the `key`
//! query parameter; the ID token, when configured, goes in `Authorization: Bearer`.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Url};
use serde::de::{DeserializeOwned, IgnoredAny};
use store::{Document, DocumentStore, Fields, StoreError};

use crate::config::FirebaseConfig;
use crate::wire::{status_error, ListDocumentsResponse, WireDocument, WriteDocument};

#[derive(Clone, Debug)]
pub struct FirestoreClient {
    http: reqwest::Client,
    config: FirebaseConfig,
}

impl FirestoreClient {
    pub fn new(config: FirebaseConfig) -> Result<Self, StoreError> {
        let mut builder = reqwest::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let http = builder.build().map_err(StoreError::unavailable)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &FirebaseConfig {
        &self.config
    }

    /// URL of `segments` below the project's documents root.
    pub fn url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.config.endpoint).map_err(|e| {
            StoreError::Unavailable(format!("invalid endpoint {:?}: {e}", self.config.endpoint))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                StoreError::Unavailable(format!(
                    "endpoint {:?} cannot carry a path",
                    self.config.endpoint
                ))
            })?
            .pop_if_empty()
            .extend([
                "v1",
                "projects",
                self.config.project_id.as_str(),
                "databases",
                self.config.database.as_str(),
                "documents",
            ])
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut req = self.http.request(method, url);
        if let Some(key) = &self.config.api_key {
            req = req.query(&[("key", key)]);
        }
        if let Some(token) = &self.config.id_token {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, StoreError> {
        let response = req.send().await.map_err(StoreError::unavailable)?;
        let status = response.status();
        let body = response.text().await.map_err(StoreError::unavailable)?;

        if !status.is_success() {
            let err = status_error(status.as_u16(), &body);
            tracing::error!("Firestore request failed: {}", err);
            return Err(err);
        }
        serde_json::from_str(&body).map_err(StoreError::decode)
    }

    async fn list_page(
        &self,
        collection: &str,
        page_token: Option<&str>,
    ) -> Result<ListDocumentsResponse, StoreError> {
        let mut req = self.request(Method::GET, self.url(&[collection])?);
        if self.config.page_size > 0 {
            req = req.query(&[("pageSize", self.config.page_size)]);
        }
        if let Some(token) = page_token {
            req = req.query(&[("pageToken", token)]);
        }
        self.send(req).await
    }
}

impl DocumentStore for FirestoreClient {
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let page = self.list_page(collection, page_token.as_deref()).await?;
            let next = page.next_page().map(str::to_string);
            documents.extend(page.documents.into_iter().map(WireDocument::into_document));
            match next {
                None => break,
                Some(token) if page_token.as_deref() == Some(token.as_str()) => {
                    return Err(StoreError::Decode(format!(
                        "list of {collection:?} repeated page token {token:?}"
                    )));
                }
                Some(token) => page_token = Some(token),
            }
            tracing::debug!(%collection, fetched = documents.len(), "fetching next page");
        }
        Ok(documents)
    }

    async fn create_document(
        &self,
        collection: &str,
        fields: Fields,
    ) -> Result<Document, StoreError> {
        let req = self
            .request(Method::POST, self.url(&[collection])?)
            .json(&WriteDocument::new(&fields));
        let created: WireDocument = self.send(req).await?;
        Ok(created.into_document())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let req = self.request(Method::DELETE, self.url(&[collection, id])?);
        let _: IgnoredAny = self.send(req).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    fn client(endpoint: &str) -> FirestoreClient {
        FirestoreClient::new(FirebaseConfig {
            project_id: "demo-project".into(),
            endpoint: endpoint.into(),
            ..FirebaseConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_collection_url() {
        let url = client("https://firestore.googleapis.com")
            .url(&["users"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://firestore.googleapis.com/v1/projects/demo-project/databases/(default)/documents/users"
        );
    }

    #[test]
    fn test_document_url_encodes_segments() {
        let url = client("http://localhost:8080/")
            .url(&["users", "a b/c"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/v1/projects/demo-project/databases/(default)/documents/users/a%20b%2Fc"
        );
    }

    #[test]
    fn test_bad_endpoint() {
        assert!(matches!(
            client("not a url").url(&["users"]),
            Err(StoreError::Unavailable(_))
        ));
    }

    #[test]
    fn test_request_carries_key_and_token() {
        let client = FirestoreClient::new(FirebaseConfig {
            project_id: "p".into(),
            api_key: Some("AIza".into()),
            id_token: Some("tok".into()),
            ..FirebaseConfig::default()
        })
        .unwrap();

        let req = client
            .request(Method::GET, client.url(&["users"]).unwrap())
            .build()
            .unwrap();
        assert_eq!(req.url().query(), Some("key=AIza"));
        assert_eq!(
            req.headers()
                .get(reqwest::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer tok")
        );
    }

    /// Serve one canned JSON body per connection on a loopback port.
    /// The handle yields the request line of every request it answered.
    fn serve(bodies: Vec<&'static str>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let mut requests = Vec::new();
            for body in bodies {
                let (mut stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                loop {
                    let mut header = String::new();
                    reader.read_line(&mut header).unwrap();
                    if header == "\r\n" || header.is_empty() {
                        break;
                    }
                }
                requests.push(request_line.trim_end().to_string());
                write!(
                    stream,
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                )
                .unwrap();
            }
            requests
        });
        (endpoint, handle)
    }

    fn local_client(endpoint: &str) -> FirestoreClient {
        FirestoreClient::new(FirebaseConfig {
            project_id: "demo-project".into(),
            endpoint: endpoint.into(),
            timeout_secs: 5,
            ..FirebaseConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_follows_next_page_token() {
        let (endpoint, server) = serve(vec![
            r#"{"documents":[{"name":"projects/demo-project/databases/(default)/documents/users/a","fields":{"username":{"stringValue":"a"}}}],"nextPageToken":"page-2"}"#,
            r#"{"documents":[{"name":"projects/demo-project/databases/(default)/documents/users/b","fields":{"username":{"stringValue":"b"}}}]}"#,
        ]);

        let docs = local_client(&endpoint).list_documents("users").await.unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);

        let requests = server.join().unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].starts_with("GET /v1/projects/demo-project/databases/(default)/documents/users?"));
        assert!(requests[0].contains("pageSize=300"));
        assert!(!requests[0].contains("pageToken"));
        assert!(requests[1].contains("pageToken=page-2"));
    }

    #[tokio::test]
    async fn test_list_stops_on_repeated_page_token() {
        let (endpoint, server) = serve(vec![
            r#"{"documents":[],"nextPageToken":"again"}"#,
            r#"{"documents":[],"nextPageToken":"again"}"#,
        ]);

        let result = local_client(&endpoint).list_documents("users").await;
        assert!(matches!(result, Err(StoreError::Decode(_))));
        assert_eq!(server.join().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unavailable() {
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        // Listener dropped: nothing accepts on `port` any more.
        let client = client(&format!("http://127.0.0.1:{port}"));
        assert!(matches!(
            client.list_documents("users").await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
