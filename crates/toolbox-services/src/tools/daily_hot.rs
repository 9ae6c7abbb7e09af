//! Daily hot-list tool
//!
//! `get_daily_hot(type, cache?)` fetches one ranked list from the
//! aggregator and renders a header block plus one body block.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use toolbox::command::{CommandRegistry, CommandSpec, FieldKind, FieldSpec};
use toolbox::error::{upstream_detail, Result, ToolError};
use toolbox::network::JsonSource;

use super::hot_source::{source_catalog, HotListSource, SOURCE_SLUGS};

// =============================================================================
// Internal API response types (serde)
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HotListResponse {
    #[serde(default)]
    update_time: Value,
    #[serde(default)]
    from_cache: bool,
    data: Vec<HotListItem>,
}

#[derive(Debug, Deserialize)]
struct HotListItem {
    title: String,
    desc: Option<String>,
    #[serde(default)]
    hot: Value,
    #[serde(default)]
    url: String,
}

/// Scores arrive as numbers or preformatted strings
fn hot_score(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_item(item: &HotListItem) -> String {
    format!(
        "标题📖：{} \n热度🔥：{} \n链接🔗：{} \n描述📖： {}\n\n",
        item.title,
        hot_score(&item.hot),
        item.url,
        item.desc.as_deref().unwrap_or_default(),
    )
}

/// A 2xx answer without a list is either an error body or a shape we
/// don't understand
fn missing_data(body: &Value) -> ToolError {
    match upstream_detail(body) {
        Some(detail) => ToolError::UpstreamStatus {
            status: body
                .get("code")
                .and_then(Value::as_u64)
                .and_then(|c| u16::try_from(c).ok())
                .unwrap_or(200),
            detail: Some(detail),
        },
        None => ToolError::Decode("missing list data".to_string()),
    }
}

// =============================================================================
// Aggregator client
// =============================================================================

/// Hot-list lookups against a local aggregation service
pub struct DailyHot {
    source: Arc<dyn JsonSource>,
    base_url: String,
}

impl DailyHot {
    pub fn new(source: Arc<dyn JsonSource>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            source,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch one list and render `[header, body]`
    pub fn fetch(&self, list: HotListSource, cache: bool) -> Result<Vec<String>> {
        let url = format!("{}/{}", self.base_url, list.slug());
        let value = self.source.get_json(&url, &[("cache", cache.to_string())])?;
        if !value.get("data").is_some_and(Value::is_array) {
            return Err(missing_data(&value));
        }
        let response: HotListResponse =
            serde_json::from_value(value).map_err(|e| ToolError::Decode(e.to_string()))?;

        tracing::debug!(
            list = list.slug(),
            entries = response.data.len(),
            from_cache = response.from_cache,
            update_time = %response.update_time,
            "hot list fetched"
        );

        let body = response
            .data
            .iter()
            .map(render_item)
            .collect::<Vec<_>>()
            .join("\n");

        Ok(vec![
            format!("榜单类型: {}", list.display_name()),
            format!("榜单数据:\n\n{body}"),
        ])
    }
}

pub fn register(registry: &mut CommandRegistry, daily_hot: DailyHot) {
    registry.register(
        CommandSpec::new("get_daily_hot", "获取榜单信息", move |args| {
            let slug = args.str("type").unwrap_or_default();
            let list = HotListSource::from_slug(slug)
                .ok_or_else(|| ToolError::Other(format!("Unknown list type '{slug}'")))?;
            let cache = args.boolean("cache").unwrap_or(true);
            Ok(daily_hot.fetch(list, cache)?.into())
        })
        .failure_context("Error fetching daily news data")
        .field(
            FieldSpec::required("type", FieldKind::Enum(SOURCE_SLUGS))
                .describe(format!("榜单类型: {}", source_catalog())),
        )
        .field(
            FieldSpec::optional("cache", FieldKind::Boolean)
                .with_default(true)
                .describe("Serve from the aggregator's cache when available"),
        ),
    );
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::FakeSource;
    use serde_json::json;
    use toolbox::network::HttpClient;
    use toolbox::pipeline::Pipeline;

    fn sample() -> Value {
        json!({
            "code": 200,
            "name": "zhihu",
            "updateTime": "2024-05-01T08:00:00.000Z",
            "fromCache": true,
            "data": [
                {
                    "id": 1,
                    "title": "First",
                    "desc": "about first",
                    "hot": 1200,
                    "timestamp": 1714550400000_i64,
                    "url": "https://example.com/1",
                    "mobileUrl": "https://m.example.com/1"
                },
                {
                    "id": "b",
                    "title": "Second",
                    "hot": "98万",
                    "url": "https://example.com/2",
                    "mobileUrl": "https://m.example.com/2"
                }
            ]
        })
    }

    fn pipeline(source: Arc<dyn JsonSource>) -> Pipeline {
        let mut registry = CommandRegistry::new();
        register(&mut registry, DailyHot::new(source, "http://hot.test/"));
        Pipeline::new(registry)
    }

    #[test]
    fn test_renders_header_and_entries() {
        let source = Arc::new(FakeSource::returning(sample()));
        let env = pipeline(source.clone()).invoke("get_daily_hot", &json!({ "type": "zhihu" }));
        assert!(!env.is_error);
        assert_eq!(env.blocks.len(), 2);
        assert_eq!(env.blocks[0].text, "榜单类型: 知乎");
        assert_eq!(
            env.blocks[1].text,
            "榜单数据:\n\n\
             标题📖：First \n热度🔥：1200 \n链接🔗：https://example.com/1 \n描述📖： about first\n\n\
             \n\
             标题📖：Second \n热度🔥：98万 \n链接🔗：https://example.com/2 \n描述📖： \n\n"
        );
    }

    #[test]
    fn test_url_and_cache_flag() {
        let source = Arc::new(FakeSource::returning(sample()));
        let p = pipeline(source.clone());
        p.invoke("get_daily_hot", &json!({ "type": "36kr" }));
        p.invoke("get_daily_hot", &json!({ "type": "36kr", "cache": false }));
        let calls = source.calls();
        assert_eq!(calls[0].0, "http://hot.test/36kr");
        assert_eq!(calls[0].1, vec![("cache".to_string(), "true".to_string())]);
        assert_eq!(calls[1].1, vec![("cache".to_string(), "false".to_string())]);
    }

    #[test]
    fn test_unknown_type_rejected_before_fetch() {
        let source = Arc::new(FakeSource::returning(sample()));
        let env = pipeline(source.clone()).invoke("get_daily_hot", &json!({ "type": "myspace" }));
        assert!(env.is_error);
        assert!(env
            .first_text()
            .unwrap()
            .starts_with("Invalid value for field 'type': expected one of: zhihu, weibo"));
        assert!(source.calls().is_empty());
    }

    #[test]
    fn test_empty_list() {
        let source = Arc::new(FakeSource::returning(json!({ "data": [] })));
        let env = pipeline(source).invoke("get_daily_hot", &json!({ "type": "lol" }));
        assert_eq!(env.blocks[0].text, "榜单类型: 英雄联盟");
        assert_eq!(env.blocks[1].text, "榜单数据:\n\n");
    }

    #[test]
    fn test_error_body_without_data_is_upstream_error() {
        let source = Arc::new(FakeSource::returning(json!({ "code": 500, "message": "获取失败" })));
        let env = pipeline(source).invoke("get_daily_hot", &json!({ "type": "zhihu" }));
        assert!(env.is_error);
        assert_eq!(env.blocks.len(), 1);
        assert_eq!(env.first_text(), Some("Error fetching daily news data: 获取失败"));
    }

    #[test]
    fn test_unexpected_shape_is_invalid_response() {
        let source = Arc::new(FakeSource::returning(json!({ "items": [] })));
        let env = pipeline(source).invoke("get_daily_hot", &json!({ "type": "zhihu" }));
        assert!(env.is_error);
        assert_eq!(
            env.first_text(),
            Some("Error fetching daily news data: Invalid response from server: missing list data")
        );
    }

    #[test]
    fn test_upstream_status_message() {
        let source = Arc::new(FakeSource::new(|_| {
            Err(ToolError::UpstreamStatus {
                status: 500,
                detail: Some("Internal Server Error".into()),
            })
        }));
        let env = pipeline(source).invoke("get_daily_hot", &json!({ "type": "weibo" }));
        assert!(env.is_error);
        assert_eq!(
            env.first_text(),
            Some("Error fetching daily news data: Internal Server Error")
        );
    }

    #[test]
    fn test_unreachable_aggregator() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = HttpClient::new().unwrap();
        let mut registry = CommandRegistry::new();
        register(
            &mut registry,
            DailyHot::new(Arc::new(client), format!("http://127.0.0.1:{port}")),
        );
        let env = Pipeline::new(registry).invoke("get_daily_hot", &json!({ "type": "zhihu" }));
        assert!(env.is_error);
        assert!(env
            .first_text()
            .unwrap()
            .starts_with("Error fetching daily news data: Could not connect to"));
    }
}
