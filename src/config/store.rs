use super::error::{ConfigError, ConfigResult};
use super::splice;
use super::{ProjectId, ServerContext, ServerId, Token};
use crate::atomic::write_atomic;
use serde_json::{Map, Value};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

const CURRENT_SERVER: &str = "CurrentServer";
const SERVERS: &str = "Servers";
const TOKEN_KEY: &str = "tokenKey";
const URL: &str = "url";
const PROJECT: &str = "project";

/// The Rancher CLI config file (`cli2.json`). Reads go through a parsed JSON
/// value; the one write edits the raw text so everything else survives as is.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_raw(&self) -> ConfigResult<String> {
        fs::read_to_string(&self.path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ConfigError::NotFound(self.path.clone()),
            _ => ConfigError::Read {
                path: self.path.clone(),
                source,
            },
        })
    }

    fn parse(&self, contents: &str) -> ConfigResult<Value> {
        let doc: Value = serde_json::from_str(contents).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;

        if !doc.is_object() {
            return Err(ConfigError::Malformed {
                path: self.path.clone(),
                reason: "top level is not an object",
            });
        }

        Ok(doc)
    }

    fn load(&self) -> ConfigResult<Value> {
        self.parse(&self.read_raw()?)
    }

    pub fn current_server(&self) -> ConfigResult<ServerId> {
        current_server_of(&self.load()?)
    }

    /// `None` when the server has no project selected yet.
    pub fn active_project(&self, server: &ServerId) -> ConfigResult<Option<ProjectId>> {
        let doc = self.load()?;
        let entry = server_entry(&doc, server)?;

        Ok(non_empty(entry, PROJECT).map(ProjectId::from))
    }

    pub fn server_context(&self) -> ConfigResult<ServerContext> {
        let doc = self.load()?;
        let id = current_server_of(&doc)?;
        let entry = server_entry(&doc, &id)?;

        let url = non_empty(entry, URL)
            .ok_or_else(|| ConfigError::MissingField {
                server: id.clone(),
                field: URL,
            })?
            .to_owned();
        let token = Token::new(non_empty(entry, TOKEN_KEY).unwrap_or_default());

        Ok(ServerContext { id, url, token })
    }

    /// Rewrites the config with only the value of `Servers.<server>.project`
    /// changed. Every other byte of the file is kept as it was.
    pub fn set_active_project(&self, server: &ServerId, project: &ProjectId) -> ConfigResult<()> {
        let contents = self.read_raw()?;
        let doc = self.parse(&contents)?;
        server_entry(&doc, server)?;

        let value = serde_json::to_string(project.as_str()).map_err(ConfigError::Serialize)?;
        let payload = splice::set_member(&contents, &[SERVERS, server.as_str()], PROJECT, &value)
            .ok_or_else(|| ConfigError::Malformed {
                path: self.path.clone(),
                reason: "server entry could not be located in the file",
            })?;

        // The edited text must still be a valid document before it replaces the original.
        serde_json::from_str::<Value>(&payload).map_err(ConfigError::Serialize)?;

        write_atomic(&self.path, payload.as_bytes()).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(
            server = %server,
            project = %project,
            path = %self.path.display(),
            "config updated"
        );
        Ok(())
    }
}

fn current_server_of(doc: &Value) -> ConfigResult<ServerId> {
    doc.get(CURRENT_SERVER)
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(ServerId::from)
        .ok_or(ConfigError::NoCurrentServer)
}

fn server_entry<'a>(doc: &'a Value, server: &ServerId) -> ConfigResult<&'a Map<String, Value>> {
    doc.get(SERVERS)
        .and_then(|servers| servers.get(server.as_str()))
        .and_then(Value::as_object)
        .ok_or_else(|| ConfigError::UnknownServer(server.clone()))
}

fn non_empty<'a>(entry: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CONFIG: &str = r#"{"Servers":{"rancherDefault":{"accessKey":"token-ab12c","secretKey":"s3cr3t","tokenKey":"token-ab12c:s3cr3t","url":"https://rancher.example.com","project":"c-m8x2k:p-7lqvd","cacert":"","kubeConfigs":{}},"staging":{"tokenKey":"token-zz:qq","url":"https://staging.example.com","project":""}},"CurrentServer":"rancherDefault"}"#;

    fn store_with(dir: &TempDir, contents: &str) -> ConfigStore {
        let path = dir.path().join("cli2.json");
        fs::write(&path, contents).unwrap();
        ConfigStore::new(path)
    }

    #[test]
    fn test_reads_current_server_and_project() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, CONFIG);

        let server = store.current_server().unwrap();
        assert_eq!(server.as_str(), "rancherDefault");

        let project = store.active_project(&server).unwrap();
        assert_eq!(project, Some(ProjectId::from("c-m8x2k:p-7lqvd")));
    }

    #[test]
    fn test_server_context_carries_url_and_token() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, CONFIG);

        let ctx = store.server_context().unwrap();
        assert_eq!(ctx.id.as_str(), "rancherDefault");
        assert_eq!(ctx.url, "https://rancher.example.com");
        assert_eq!(ctx.token, Token::new("token-ab12c:s3cr3t"));
    }

    #[test]
    fn test_empty_project_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, CONFIG);

        let project = store.active_project(&ServerId::from("staging")).unwrap();
        assert_eq!(project, None);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("cli2.json"));

        assert!(matches!(store.current_server(), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, "{\"Servers\":");

        assert!(matches!(store.current_server(), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_no_current_server() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, r#"{"Servers":{},"CurrentServer":""}"#);

        assert!(matches!(store.current_server(), Err(ConfigError::NoCurrentServer)));
    }

    #[test]
    fn test_unknown_server() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, CONFIG);

        let result = store.active_project(&ServerId::from("gone"));
        assert!(matches!(result, Err(ConfigError::UnknownServer(_))));
    }

    #[test]
    fn test_set_active_project_preserves_everything_else() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, CONFIG);
        let server = ServerId::from("rancherDefault");

        store
            .set_active_project(&server, &ProjectId::from("c-m8x2k:p-new"))
            .unwrap();

        let written = fs::read_to_string(store.path()).unwrap();
        let expected = CONFIG.replace("c-m8x2k:p-7lqvd", "c-m8x2k:p-new");
        assert_eq!(written, expected);
    }

    #[test]
    fn test_set_active_project_keeps_layout_and_escapes() {
        let dir = TempDir::new().unwrap();
        let original = r#"{
  "Servers": {
    "rancherDefault": {
      "accessKey": "token-ab12c",
      "tokenKey": "token-ab12c:s3cr3t",
      "url": "https://rancher.example.com/?a=1\u0026b=2\u003cc\u003e",
      "project": "c-1:p-1",
      "kubeConfigs": {"project": "c-1:p-1-kube"}
    }
  },
  "CurrentServer": "rancherDefault"
}
"#;
        let store = store_with(&dir, original);
        let server = ServerId::from("rancherDefault");

        store
            .set_active_project(&server, &ProjectId::from("c-1:p-2"))
            .unwrap();

        let written = fs::read_to_string(store.path()).unwrap();
        let expected = original.replace("\"project\": \"c-1:p-1\"", "\"project\": \"c-1:p-2\"");
        assert_eq!(written, expected);
        assert_eq!(
            store.active_project(&server).unwrap(),
            Some(ProjectId::from("c-1:p-2"))
        );
    }

    #[test]
    fn test_set_active_project_adds_missing_field() {
        let dir = TempDir::new().unwrap();
        let original = r#"{"Servers":{"rancherDefault":{"url":"https://rancher.example.com"}},"CurrentServer":"rancherDefault"}"#;
        let store = store_with(&dir, original);
        let server = ServerId::from("rancherDefault");

        store
            .set_active_project(&server, &ProjectId::from("c-1:p-2"))
            .unwrap();

        let written = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            written,
            original.replace(
                r#""https://rancher.example.com""#,
                r#""https://rancher.example.com","project":"c-1:p-2""#
            )
        );
    }

    #[test]
    fn test_set_active_project_on_unknown_server_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, CONFIG);

        let result = store.set_active_project(&ServerId::from("gone"), &ProjectId::from("p"));

        assert!(matches!(result, Err(ConfigError::UnknownServer(_))));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), CONFIG);
    }

    #[test]
    fn test_interrupted_write_is_invisible_to_readers() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, CONFIG);

        // A crash between writing the temp file and renaming it leaves a
        // truncated sibling behind; the config itself must still parse.
        let full = CONFIG.replace("c-m8x2k:p-7lqvd", "c-m8x2k:p-new");
        for cut in [0, 1, full.len() / 2, full.len() - 1] {
            let (_, leftover) = tempfile::Builder::new()
                .tempfile_in(dir.path())
                .unwrap()
                .keep()
                .unwrap();
            fs::write(&leftover, &full[..cut]).unwrap();

            let server = store.current_server().unwrap();
            let project = store.active_project(&server).unwrap();
            assert_eq!(project, Some(ProjectId::from("c-m8x2k:p-7lqvd")));
        }
    }
}
