//! Schedule data loading.
//!
//! The schedule lives at a fixed relative path (`data/schedule.json`),
//! either under a local site directory or under a base URL. Loading never
//! fails from the caller's point of view: any problem collapses to an empty
//! store and a warning in the log.

use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::header::{CACHE_CONTROL, PRAGMA};
use url::Url;

use crate::error::{CronogramaError, CronogramaResult};
use crate::schedule::ScheduleStore;

/// Location of the schedule document relative to the site root.
pub const SCHEDULE_PATH: &str = "data/schedule.json";

/// Where the schedule document is read from.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleSource {
    File(PathBuf),
    Http(Url),
}

impl ScheduleSource {
    /// `<site_dir>/data/schedule.json`
    pub fn local(site_dir: &Path) -> Self {
        ScheduleSource::File(site_dir.join(SCHEDULE_PATH))
    }

    /// `<base_url>/data/schedule.json`
    pub fn remote(base_url: &str) -> CronogramaResult<Self> {
        let mut base = Url::parse(base_url)
            .map_err(|e| CronogramaError::Config(format!("Invalid base_url '{}': {}", base_url, e)))?;

        // Treat the base as a directory so join() appends instead of replacing.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let url = base
            .join(SCHEDULE_PATH)
            .map_err(|e| CronogramaError::Config(format!("Invalid base_url '{}': {}", base_url, e)))?;
        Ok(ScheduleSource::Http(url))
    }

    /// Fetch the raw document. Remote fetches bypass caches.
    pub async fn fetch(&self) -> CronogramaResult<String> {
        match self {
            ScheduleSource::File(path) => Ok(tokio::fs::read_to_string(path).await?),
            ScheduleSource::Http(url) => {
                let response = reqwest::Client::new()
                    .get(url.clone())
                    .header(CACHE_CONTROL, "no-cache")
                    .header(PRAGMA, "no-cache")
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    return Err(CronogramaError::HttpStatus(status.as_u16()));
                }

                Ok(response.text().await?)
            }
        }
    }

    /// Fetch and normalize, reporting every failure.
    pub async fn try_load(&self) -> CronogramaResult<ScheduleStore> {
        let content = self.fetch().await?;
        ScheduleStore::from_json(&content)
    }

    /// Fetch and normalize. Any failure yields an empty store.
    pub async fn load(&self) -> ScheduleStore {
        match self.try_load().await {
            Ok(store) => {
                tracing::info!(source = %self, days = store.days().count(), "schedule loaded");
                store
            }
            Err(e) => {
                tracing::warn!(source = %self, error = %e, "could not load schedule, showing an empty one");
                ScheduleStore::empty()
            }
        }
    }
}

impl fmt::Display for ScheduleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleSource::File(path) => write!(f, "{}", path.display()),
            ScheduleSource::Http(url) => write!(f, "{}", url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn write_schedule(dir: &Path, content: &str) {
        let data = dir.join("data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join("schedule.json"), content).unwrap();
    }

    /// Serve a single HTTP response and hand back the raw request text.
    async fn serve_once(response: &'static str) -> (Url, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&buf[..n]).to_string()
        });
        (Url::parse(&format!("http://{}/", addr)).unwrap(), handle)
    }

    #[test]
    fn remote_source_appends_schedule_path() {
        let source = ScheduleSource::remote("https://example.org/muestra").unwrap();
        assert_eq!(
            source,
            ScheduleSource::Http(Url::parse("https://example.org/muestra/data/schedule.json").unwrap())
        );

        let source = ScheduleSource::remote("https://example.org/").unwrap();
        assert_eq!(source.to_string(), "https://example.org/data/schedule.json");
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let err = ScheduleSource::remote("not a url").unwrap_err();
        assert!(matches!(err, CronogramaError::Config(_)));
    }

    #[tokio::test]
    async fn loads_local_file() {
        let dir = tempfile::tempdir().unwrap();
        write_schedule(
            dir.path(),
            r#"{"13": [{"time": "10:00", "activity": "Redes", "type": "informatica"}]}"#,
        );

        let store = ScheduleSource::local(dir.path()).load().await;
        assert_eq!(store.entries(13).len(), 1);
        assert_eq!(store.entries(13)[0].category, Category::Informatica);
    }

    #[tokio::test]
    async fn missing_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = ScheduleSource::local(dir.path());

        assert!(matches!(source.try_load().await, Err(CronogramaError::Io(_))));
        assert!(source.load().await.is_empty());
    }

    #[tokio::test]
    async fn wrong_shape_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_schedule(dir.path(), r#"[{"time": "10:00"}]"#);

        assert!(ScheduleSource::local(dir.path()).load().await.is_empty());
    }

    #[tokio::test]
    async fn http_fetch_bypasses_cache() {
        let body = r#"{"14": [{"time": "09:00", "activity": "Motores", "type": "automotores"}]}"#;
        let response: &'static str = Box::leak(
            format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            )
            .into_boxed_str(),
        );
        let (base, server) = serve_once(response).await;

        let store = ScheduleSource::remote(base.as_str()).unwrap().load().await;
        let request = server.await.unwrap().to_lowercase();

        assert!(request.starts_with("get /data/schedule.json"));
        assert!(request.contains("cache-control: no-cache"));
        assert_eq!(store.entries(14)[0].activity, "Motores");
    }

    #[tokio::test]
    async fn http_error_status_degrades_to_empty() {
        let (base, server) =
            serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
        let source = ScheduleSource::remote(base.as_str()).unwrap();

        assert!(matches!(source.try_load().await, Err(CronogramaError::HttpStatus(404))));
        server.await.unwrap();
    }
}
