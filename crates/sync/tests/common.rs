#![allow(dead_code)]

use async_trait::async_trait;
use cfsync_arr_api::{ArrClient, CustomFormat, Method, QualityProfile, TransportError};
use cfsync_common::Instance;
use cfsync_store::{DefinitionRepository, VersionStore};
use cfsync_sync::{SyncTarget, Syncer};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::sync::RwLock;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

/// A write the [SpyArrClient] received.
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    CreateCustomFormat(CustomFormat),
    UpdateCustomFormat(CustomFormat),
    UpdateQualityProfile(QualityProfile),
}

#[derive(Default)]
struct SpyState {
    custom_formats: Vec<CustomFormat>,
    quality_profiles: Vec<QualityProfile>,
    writes: Vec<Write>,
    next_id: i32,
    failing: bool,
    failing_format_names: HashSet<String>,
    failing_profile_ids: HashSet<i32>,
}

/// In-memory implementation of [ArrClient] that behaves like an instance and captures every
/// write made to it.
#[derive(Clone, Default)]
pub struct SpyArrClient {
    state: Arc<RwLock<SpyState>>,
}

impl SpyArrClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_custom_formats(self, custom_formats: Vec<CustomFormat>) -> Self {
        {
            let mut state = self.state.try_write().unwrap();
            state.next_id = custom_formats.iter().filter_map(|f| f.id).max().unwrap_or(0);
            state.custom_formats = custom_formats;
        }
        self
    }

    pub fn with_quality_profiles(self, quality_profiles: Vec<QualityProfile>) -> Self {
        self.state.try_write().unwrap().quality_profiles = quality_profiles;
        self
    }

    /// Make every call fail with a 500 response.
    pub fn failing(self) -> Self {
        self.state.try_write().unwrap().failing = true;
        self
    }

    /// Make creating or updating the custom format named `name` fail with a 500 response.
    pub fn failing_custom_format(self, name: &str) -> Self {
        self.state
            .try_write()
            .unwrap()
            .failing_format_names
            .insert(String::from(name));
        self
    }

    /// Make updating the quality profile `id` fail with a 500 response.
    pub fn failing_quality_profile(self, id: i32) -> Self {
        self.state.try_write().unwrap().failing_profile_ids.insert(id);
        self
    }

    pub async fn writes(&self) -> Vec<Write> {
        self.state.read().await.writes.clone()
    }

    pub async fn custom_formats(&self) -> Vec<CustomFormat> {
        self.state.read().await.custom_formats.clone()
    }

    pub async fn quality_profiles(&self) -> Vec<QualityProfile> {
        self.state.read().await.quality_profiles.clone()
    }

    fn error(method: Method, url: &str, status: u16) -> TransportError {
        TransportError::Status {
            method,
            url: String::from(url),
            status,
            body: String::from("{\"message\":\"spy failure\"}"),
        }
    }
}

#[async_trait]
impl ArrClient for SpyArrClient {
    async fn list_custom_formats(&self) -> Result<Vec<CustomFormat>, TransportError> {
        let state = self.state.read().await;
        if state.failing {
            return Err(Self::error(Method::GET, "/api/v3/customformat", 500));
        }
        Ok(state.custom_formats.clone())
    }

    async fn upsert_custom_format(
        &self,
        custom_format: &CustomFormat,
    ) -> Result<CustomFormat, TransportError> {
        let mut state = self.state.write().await;
        if state.failing || state.failing_format_names.contains(&custom_format.name) {
            let method = match custom_format.id {
                Some(_) => Method::PUT,
                None => Method::POST,
            };
            return Err(Self::error(method, "/api/v3/customformat", 500));
        }
        match custom_format.id {
            Some(id) => {
                let position = state
                    .custom_formats
                    .iter()
                    .position(|f| f.id == Some(id))
                    .ok_or_else(|| Self::error(Method::PUT, "/api/v3/customformat", 404))?;
                state.custom_formats[position] = custom_format.clone();
                state
                    .writes
                    .push(Write::UpdateCustomFormat(custom_format.clone()));
                Ok(custom_format.clone())
            }
            None => {
                state
                    .writes
                    .push(Write::CreateCustomFormat(custom_format.clone()));
                state.next_id += 1;
                let mut created = custom_format.clone();
                created.id = Some(state.next_id);
                state.custom_formats.push(created.clone());
                Ok(created)
            }
        }
    }

    async fn list_quality_profiles(&self) -> Result<Vec<QualityProfile>, TransportError> {
        let state = self.state.read().await;
        if state.failing {
            return Err(Self::error(Method::GET, "/api/v3/qualityprofile", 500));
        }
        Ok(state.quality_profiles.clone())
    }

    async fn update_quality_profile(
        &self,
        profile: &QualityProfile,
    ) -> Result<QualityProfile, TransportError> {
        let mut state = self.state.write().await;
        if state.failing || state.failing_profile_ids.contains(&profile.id) {
            return Err(Self::error(Method::PUT, "/api/v3/qualityprofile", 500));
        }
        let position = state
            .quality_profiles
            .iter()
            .position(|p| p.id == profile.id)
            .ok_or_else(|| Self::error(Method::PUT, "/api/v3/qualityprofile", 404))?;
        state.quality_profiles[position] = profile.clone();
        state
            .writes
            .push(Write::UpdateQualityProfile(profile.clone()));
        Ok(profile.clone())
    }
}

/// A definitions directory and version store in a temporary directory.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("custom_formats")).unwrap();
        Workspace { dir }
    }

    pub fn definitions_dir(&self) -> PathBuf {
        self.dir.path().join("custom_formats")
    }

    pub fn version_file(&self) -> PathBuf {
        self.dir.path().join("version.json")
    }

    pub fn write_definition(&self, filename: &str, contents: serde_json::Value) {
        fs::write(
            self.definitions_dir().join(filename),
            serde_json::to_string_pretty(&contents).unwrap(),
        )
        .unwrap();
    }

    pub fn write_raw_definition(&self, filename: &str, contents: &str) {
        fs::write(self.definitions_dir().join(filename), contents).unwrap();
    }

    pub fn remove_definition(&self, filename: &str) {
        fs::remove_file(self.definitions_dir().join(filename)).unwrap();
    }

    pub fn write_versions(&self, contents: serde_json::Value) {
        fs::write(self.version_file(), contents.to_string()).unwrap();
    }

    pub fn versions(&self) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(self.version_file()).unwrap()).unwrap()
    }

    /// A fresh [Syncer] over this workspace, as a new run would create it.
    pub fn syncer(&self) -> Syncer {
        Syncer::new(
            DefinitionRepository::new(self.definitions_dir()),
            VersionStore::load(self.version_file()),
        )
    }
}

pub fn target(name: &str, client: &SpyArrClient) -> SyncTarget<SpyArrClient> {
    let instance = Instance::new(name, "http://localhost:7878", "spy-key").unwrap();
    SyncTarget::new(instance, client.clone())
}

/// Log output captured from the current thread.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Capture logs of the current thread until the returned guard is dropped.
pub fn capture_logs() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
