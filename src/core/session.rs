// session module - remembers the last location of every opened file
//
// Reopening a file restores its selection the way reloading a page restores
// the `L` parameter from the address bar.
use super::controller::{SelectionObserver, Transition};
use super::error::Result;
use super::location::Location;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
struct SessionFile {
    files: BTreeMap<String, String>,
}

pub struct SessionStore {
    path: PathBuf,
    session: SessionFile,
}

impl SessionStore {
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("code-canvas")
            .join("session.json")
    }

    // A missing file is an empty session; a corrupt one is an error
    pub fn load(path: &Path) -> Result<Self> {
        let session = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(error) if error.kind() == ErrorKind::NotFound => SessionFile::default(),
            Err(error) => return Err(error.into()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            session,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn location_for(&self, file: &str) -> Option<Location> {
        let stored = self.session.files.get(file)?;
        match Location::parse(stored) {
            Ok(location) => Some(location),
            Err(error) => {
                tracing::warn!(file, %error, "ignoring stored location");
                None
            }
        }
    }

    pub fn record(&mut self, file: &str, location: &Location) {
        self.session
            .files
            .insert(file.to_string(), location.as_str().to_string());
    }

    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&self.session)?;
        fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }
}

/// Observer that writes the file's location to the session after every change.
pub struct SessionRecorder {
    store: SessionStore,
    file: String,
}

impl SessionRecorder {
    pub fn new(store: SessionStore, file: String) -> Self {
        Self { store, file }
    }
}

impl SelectionObserver for SessionRecorder {
    fn selection_changed(&mut self, _transition: &Transition, location: &Location) {
        self.store.record(&self.file, location);
        if let Err(error) = self.store.save() {
            tracing::warn!(%error, path = %self.store.path().display(), "failed to save session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::controller::SelectionController;
    use crate::core::error::CanvasError;

    #[test]
    fn missing_session_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::load(&dir.path().join("session.json")).unwrap();
        assert!(store.location_for("/tmp/a.rs").is_none());
    }

    #[test]
    fn corrupt_session_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(SessionStore::load(&path), Err(CanvasError::Session(_))));
    }

    #[test]
    fn recorded_locations_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut store = SessionStore::load(&path).unwrap();
        store.record("/src/app.py", &Location::parse("file:///src/app.py?L=4-9").unwrap());
        store.save().unwrap();

        let reloaded = SessionStore::load(&path).unwrap();
        let location = reloaded.location_for("/src/app.py").unwrap();
        assert_eq!(location.range_param().as_deref(), Some("4-9"));
    }

    #[test]
    fn recorder_follows_the_controller() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = SessionStore::load(&path).unwrap();

        let mut controller =
            SelectionController::new(Location::parse("file:///src/app.py").unwrap());
        controller.subscribe(Box::new(SessionRecorder::new(store, "/src/app.py".into())));
        controller.click(12, false);
        controller.click(14, true);

        let reloaded = SessionStore::load(&path).unwrap();
        let location = reloaded.location_for("/src/app.py").unwrap();
        assert_eq!(location.range_param().as_deref(), Some("12-14"));
    }
}
