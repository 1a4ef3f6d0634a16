//! # Control API Module
//!
//! Request/response access to the media player's HTTP control interface
//! (VLC's `/requests/*.json` endpoints). Four calls are needed:
//!
//! - `playlist.json` - the playlist tree, flattened into a [`PlaylistSnapshot`]
//! - `status.json` - player status, of which only the shuffle flag is used
//! - `status.json?command=pl_play&id=..` - make an entry current
//! - `status.json?command=pl_delete&id=..` - drop an entry from the playlist
//!
//! The [`ControlApi`] trait is the seam between the curation logic and the
//! network. [`VlcHttpClient`] implements it with a blocking `ureq` agent; the
//! engine and orchestrator only ever see the trait, so they can be driven by
//! a scripted player in tests.
//!
//! ## Authentication
//!
//! VLC's web interface uses HTTP basic auth with an empty user name and the
//! configured password, so every request carries
//! `Authorization: Basic base64(":" + password)`.
//!
//! ## Failures
//!
//! A non-2xx answer becomes [`Error::ApiStatus`] with the status code and
//! body, an unreachable player becomes [`Error::ApiTransport`], and a body
//! that is not the expected JSON becomes [`Error::ApiResponse`].

use std::time::Duration;

use base64::Engine;
use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::playlist::PlaylistSnapshot;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const IO_TIMEOUT: Duration = Duration::from_secs(15);

/// Marker value VLC puts in the `current` field of the active entry.
const CURRENT_MARKER: &str = "current";

/// One node of the playlist tree as VLC serialises it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistNode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub current: Option<String>,
    #[serde(default)]
    pub children: Vec<PlaylistNode>,
}

impl PlaylistNode {
    pub fn is_current(&self) -> bool {
        self.current.as_deref() == Some(CURRENT_MARKER)
    }
}

/// The parts of `status.json` the curator cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerStatus {
    /// Shuffle ("random") playback enabled
    pub random: bool,
    /// File name of the item the status describes, when the player reports one
    pub filename: Option<String>,
}

impl PlayerStatus {
    /// Pull the status fields out of a raw `status.json` document.
    ///
    /// Older VLC builds report `random` as `0`/`1` instead of a boolean,
    /// both are accepted.
    pub fn from_json(value: &Value) -> Self {
        let random = value
            .get("random")
            .map(|flag| {
                flag.as_bool()
                    .or_else(|| flag.as_i64().map(|number| number != 0))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        let filename = value
            .get("information")
            .and_then(|info| info.get("category"))
            .and_then(|category| category.get("meta"))
            .and_then(|meta| meta.get("filename"))
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);

        Self { random, filename }
    }
}

/// Everything the curator needs from a media player.
///
/// Calls are issued strictly one after another; implementations never see
/// two requests in flight.
pub trait ControlApi {
    /// Fetch the current playlist.
    fn playlist(&mut self) -> Result<PlaylistSnapshot>;

    /// Fetch the player status.
    fn status(&mut self) -> Result<PlayerStatus>;

    /// Make the entry with `id` current.
    fn play(&mut self, id: &str) -> Result<()>;

    /// Remove the entry with `id` from the playlist, returning the status the
    /// player answers with.
    fn delete(&mut self, id: &str) -> Result<PlayerStatus>;
}

/// [`ControlApi`] over VLC's HTTP interface.
pub struct VlcHttpClient {
    agent: ureq::Agent,
    base_url: String,
    auth_header: String,
}

impl VlcHttpClient {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(IO_TIMEOUT)
            .timeout_write(IO_TIMEOUT)
            .build();

        Self {
            agent,
            base_url: config.base_url(),
            auth_header: basic_auth_header(&config.password),
        }
    }

    fn request_url(&self, endpoint: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}/{}", self.base_url, endpoint);
        if !params.is_empty() {
            let query: Vec<String> = params
                .iter()
                .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
                .collect();
            url.push('?');
            url.push_str(&query.join("&"));
        }
        url
    }

    fn get_json(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = self.request_url(endpoint, params);
        debug!("GET {url}");

        let response = self
            .agent
            .get(&url)
            .set("Authorization", &self.auth_header)
            .call()?;

        let status = response.status();
        if !(200..300).contains(&status) {
            let body = response.into_string().unwrap_or_default();
            return Err(Error::ApiStatus { status, body });
        }

        response
            .into_json::<Value>()
            .map_err(|e| Error::ApiResponse(format!("{endpoint}: {e}")))
    }
}

impl ControlApi for VlcHttpClient {
    fn playlist(&mut self) -> Result<PlaylistSnapshot> {
        let value = self.get_json("playlist.json", &[])?;
        let root: PlaylistNode = serde_json::from_value(value)
            .map_err(|e| Error::ApiResponse(format!("playlist.json: {e}")))?;
        let snapshot = PlaylistSnapshot::from_tree(&root);
        debug!("Fetched playlist with {} entries", snapshot.len());
        Ok(snapshot)
    }

    fn status(&mut self) -> Result<PlayerStatus> {
        let value = self.get_json("status.json", &[])?;
        Ok(PlayerStatus::from_json(&value))
    }

    fn play(&mut self, id: &str) -> Result<()> {
        self.get_json("status.json", &[("command", "pl_play"), ("id", id)])?;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<PlayerStatus> {
        let value = self.get_json("status.json", &[("command", "pl_delete"), ("id", id)])?;
        Ok(PlayerStatus::from_json(&value))
    }
}

/// VLC ignores the user name, so the credential is `:password`.
pub fn basic_auth_header(password: &str) -> String {
    let token = base64::engine::general_purpose::STANDARD.encode(format!(":{password}"));
    format!("Basic {token}")
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_basic_auth_header() {
        // base64(":secret")
        assert_eq!(basic_auth_header("secret"), "Basic OnNlY3JldA==");
        // base64(":")
        assert_eq!(basic_auth_header(""), "Basic Og==");
    }

    #[test]
    fn test_request_url_encodes_params() {
        let config = Config {
            host: "localhost".to_string(),
            port: 8080,
            ..Config::default()
        };
        let client = VlcHttpClient::new(&config);

        assert_eq!(
            client.request_url("playlist.json", &[]),
            "http://localhost:8080/requests/playlist.json"
        );
        assert_eq!(
            client.request_url("status.json", &[("command", "pl_play"), ("id", "4 5")]),
            "http://localhost:8080/requests/status.json?command=pl_play&id=4%205"
        );
    }

    #[test]
    fn test_playlist_node_deserialization() {
        let raw = json!({
            "type": "node", "ro": "rw", "name": "", "id": "0",
            "children": [
                {
                    "type": "node", "ro": "ro", "name": "Playlist", "id": "1",
                    "children": [
                        {"type": "leaf", "ro": "rw", "name": "a.mkv", "id": "4",
                         "uri": "file:///media/a.mkv", "duration": 61},
                        {"type": "leaf", "ro": "rw", "name": "b c.mkv", "id": "5",
                         "uri": "file:///media/b%20c.mkv", "current": "current", "duration": 12}
                    ]
                },
                {"type": "node", "ro": "ro", "name": "Media Library", "id": "2", "children": []}
            ]
        });

        let root: PlaylistNode = serde_json::from_value(raw).unwrap();
        let snapshot = PlaylistSnapshot::from_tree(&root);
        assert_eq!(snapshot.len(), 2);
        let current = snapshot.current().unwrap();
        assert_eq!(current.id, "5");
        assert_eq!(current.uri, "file:///media/b%20c.mkv");
    }

    #[test]
    fn test_player_status_from_json() {
        let status = PlayerStatus::from_json(&json!({
            "random": true,
            "information": {"category": {"meta": {"filename": "a.mkv"}}}
        }));
        assert!(status.random);
        assert_eq!(status.filename.as_deref(), Some("a.mkv"));

        let legacy = PlayerStatus::from_json(&json!({"random": 1}));
        assert!(legacy.random);

        let off = PlayerStatus::from_json(&json!({"state": "playing"}));
        assert!(!off.random);
        assert!(off.filename.is_none());
    }

    mod wire {
        use super::*;
        use mockito::{Matcher, Server, ServerGuard};

        const AUTH: &str = "Basic OnRlc3Q=";

        fn client_for(server: &ServerGuard) -> VlcHttpClient {
            let address = server.host_with_port();
            let (host, port) = address.rsplit_once(':').unwrap();
            VlcHttpClient::new(&Config {
                host: host.to_string(),
                port: port.parse().unwrap(),
                password: "test".to_string(),
                ..Config::default()
            })
        }

        fn command(name: &str, id: &str) -> Matcher {
            Matcher::AllOf(vec![
                Matcher::UrlEncoded("command".into(), name.into()),
                Matcher::UrlEncoded("id".into(), id.into()),
            ])
        }

        #[test]
        fn test_play_sends_auth_and_command() {
            let mut server = Server::new();
            let mock = server
                .mock("GET", "/requests/status.json")
                .match_query(command("pl_play", "4"))
                .match_header("authorization", AUTH)
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(r#"{"state": "playing", "random": true}"#)
                .create();

            let mut client = client_for(&server);
            client.play("4").unwrap();

            mock.assert();
        }

        #[test]
        fn test_delete_parses_reported_filename() {
            let mut server = Server::new();
            let mock = server
                .mock("GET", "/requests/status.json")
                .match_query(command("pl_delete", "9"))
                .match_header("authorization", AUTH)
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(
                    r#"{"random": false,
                        "information": {"category": {"meta": {"filename": "next clip.mkv"}}}}"#,
                )
                .create();

            let mut client = client_for(&server);
            let status = client.delete("9").unwrap();

            mock.assert();
            assert!(!status.random);
            assert_eq!(status.filename.as_deref(), Some("next clip.mkv"));
        }

        #[test]
        fn test_playlist_over_http() {
            let mut server = Server::new();
            let mock = server
                .mock("GET", "/requests/playlist.json")
                .match_header("authorization", AUTH)
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(
                    r#"{"type": "node", "id": "0", "name": "", "children": [
                        {"type": "node", "id": "1", "name": "Playlist", "children": [
                            {"type": "leaf", "id": "4", "name": "a", "uri": "file:///m/a.mkv"},
                            {"type": "leaf", "id": "5", "name": "b", "uri": "file:///m/b.mkv",
                             "current": "current"}
                        ]}
                    ]}"#,
                )
                .create();

            let mut client = client_for(&server);
            let snapshot = client.playlist().unwrap();

            mock.assert();
            assert_eq!(snapshot.len(), 2);
            assert_eq!(snapshot.current().map(|entry| entry.id.as_str()), Some("5"));
        }

        #[test]
        fn test_error_status_keeps_code_and_body() {
            let mut server = Server::new();
            server
                .mock("GET", "/requests/playlist.json")
                .with_status(500)
                .with_body("boom")
                .create();

            let mut client = client_for(&server);
            let err = client.playlist().unwrap_err();

            match err {
                Error::ApiStatus { status, body } => {
                    assert_eq!(status, 500);
                    assert_eq!(body, "boom");
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_unparsable_body_is_response_error() {
            let mut server = Server::new();
            server
                .mock("GET", "/requests/status.json")
                .with_status(200)
                .with_body("<html>login</html>")
                .create();

            let mut client = client_for(&server);
            assert!(matches!(client.status(), Err(Error::ApiResponse(_))));
        }

        #[test]
        fn test_unreachable_player_is_transport_error() {
            let port = {
                let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
                listener.local_addr().unwrap().port()
            };
            let mut client = VlcHttpClient::new(&Config {
                host: "127.0.0.1".to_string(),
                port,
                ..Config::default()
            });

            let err = client.status().unwrap_err();
            assert!(matches!(err, Error::ApiTransport(_)));
            assert_eq!(err.status(), None);
        }
    }
}
