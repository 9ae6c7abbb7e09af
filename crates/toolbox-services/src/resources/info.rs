//! Process and user information resources
//!
//! `system://info` describes the running server, `user://{username}/info`
//! echoes back a username with its access level.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use toolbox::resource::{ResourceRegistry, ResourceSpec, UriParams};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SystemInfo {
    platform: &'static str,
    arch: &'static str,
    server_name: &'static str,
    server_version: &'static str,
    timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserInfo<'a> {
    username: &'a str,
    access_level: &'static str,
    last_login: String,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to serialize resource");
        "{}".to_string()
    })
}

fn access_level(username: &str) -> &'static str {
    if username == "admin" {
        "administrator"
    } else {
        "user"
    }
}

/// Register `system-info` and `user-info` for the named server
pub fn register(resources: &mut ResourceRegistry, server_name: &'static str, server_version: &'static str) {
    resources.register(ResourceSpec::new("system-info", "system://info", move |_| {
        pretty(&SystemInfo {
            platform: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            server_name,
            server_version,
            timestamp: now(),
        })
    }));

    resources.register(ResourceSpec::new(
        "user-info",
        "user://{username}/info",
        |params: &UriParams| {
            let username = params.get("username").map(String::as_str).unwrap_or_default();
            pretty(&UserInfo {
                username,
                access_level: access_level(username),
                last_login: now(),
            })
        },
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn registry() -> ResourceRegistry {
        let mut resources = ResourceRegistry::new();
        register(&mut resources, "greeting", "9.9.9");
        resources
    }

    fn read_json(uri: &str) -> Value {
        let contents = registry().read(uri).unwrap();
        assert_eq!(contents.uri, uri);
        assert_eq!(contents.mime_type, "application/json");
        serde_json::from_str(&contents.text).unwrap()
    }

    #[test]
    fn test_system_info() {
        let info = read_json("system://info");
        assert_eq!(info["platform"], std::env::consts::OS);
        assert_eq!(info["serverName"], "greeting");
        assert_eq!(info["serverVersion"], "9.9.9");
        let ts = info["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
        assert!(ts.ends_with('Z'));
    }

    #[test]
    fn test_user_access_levels() {
        assert_eq!(read_json("user://admin/info")["accessLevel"], "administrator");
        let alice = read_json("user://alice/info");
        assert_eq!(alice["username"], "alice");
        assert_eq!(alice["accessLevel"], "user");
        assert!(alice["lastLogin"].is_string());
    }

    #[test]
    fn test_listing_split() {
        let resources = registry();
        assert_eq!(resources.statics().map(|r| r.name).collect::<Vec<_>>(), ["system-info"]);
        assert_eq!(resources.templates().map(|r| r.name).collect::<Vec<_>>(), ["user-info"]);
        assert!(resources.read("user:///info").is_none());
    }
}
