//! `infrastructure/monitoring/grafana/dashboards/<namespace>.json`
//!
//! Dashboards are keyed by namespace, not by service, so this is not an
//! [`Emitter`](super::Emitter): the scaffold service calls it once per
//! configured namespace after the per-service loop.

use serde_json::json;

use crate::domain::record::validate_token;
use crate::domain::{ArtifactKind, DomainError, RenderedFile, layout};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardEmitter {
    namespaces: Vec<String>,
}

impl DashboardEmitter {
    pub fn new<I, S>(namespaces: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let namespaces = namespaces
            .into_iter()
            .map(Into::into)
            .map(|ns: String| {
                if ns.trim().is_empty() || validate_token(&ns).is_err() {
                    Err(DomainError::InvalidNamespace(ns))
                } else {
                    Ok(ns)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { namespaces })
    }

    pub fn render_all(&self) -> Vec<RenderedFile> {
        self.namespaces.iter().map(|ns| render(ns)).collect()
    }
}

fn render(namespace: &str) -> RenderedFile {
    let selector = format!("namespace=\"{namespace}\"");
    let panel = |id: u32, title: &str, expr: String, x: u32, y: u32| {
        json!({
            "id": id,
            "type": "timeseries",
            "title": title,
            "datasource": { "type": "prometheus", "uid": "${datasource}" },
            "gridPos": { "h": 8, "w": 12, "x": x, "y": y },
            "targets": [{ "expr": expr, "refId": "A" }],
        })
    };

    let dashboard = json!({
        "dashboard": {
            "uid": format!("ns-{namespace}"),
            "title": format!("{namespace} namespace overview"),
            "tags": ["generated", namespace],
            "timezone": "browser",
            "schemaVersion": 39,
            "refresh": "30s",
            "time": { "from": "now-6h", "to": "now" },
            "templating": {
                "list": [{
                    "name": "datasource",
                    "type": "datasource",
                    "query": "prometheus",
                }]
            },
            "panels": [
                panel(1, "Request rate",
                    format!("sum(rate(http_requests_total{{{selector}}}[5m])) by (service)"), 0, 0),
                panel(2, "Error rate",
                    format!("sum(rate(http_requests_total{{{selector},code=~\"5..\"}}[5m])) by (service)"), 12, 0),
                panel(3, "p95 latency",
                    format!("histogram_quantile(0.95, sum(rate(http_request_duration_seconds_bucket{{{selector}}}[5m])) by (le, service))"), 0, 8),
                panel(4, "Pod restarts",
                    format!("sum(increase(kube_pod_container_status_restarts_total{{{selector}}}[1h])) by (pod)"), 12, 8),
            ],
        },
        "folderUid": namespace,
        "overwrite": true,
    });

    RenderedFile::new(
        ArtifactKind::Dashboard,
        layout::dashboard_path(namespace),
        format!("{dashboard:#}\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn one_file_per_namespace() {
        let emitter = DashboardEmitter::new(["core", "edge"]).unwrap();
        let files = emitter.render_all();
        assert_eq!(files.len(), 2);
        assert!(files[0].path.ends_with("dashboards/core.json"));
        assert!(files[1].path.ends_with("dashboards/edge.json"));
    }

    #[test]
    fn dashboard_is_valid_json_with_namespace_selectors() {
        let file = render("data");
        let value: Value = serde_json::from_str(&file.content).unwrap();
        assert_eq!(value["dashboard"]["uid"], "ns-data");
        assert_eq!(value["dashboard"]["panels"].as_array().unwrap().len(), 4);
        let expr = value["dashboard"]["panels"][0]["targets"][0]["expr"]
            .as_str()
            .unwrap();
        assert!(expr.contains("namespace=\"data\""));
    }

    #[test]
    fn rendering_is_stable() {
        assert_eq!(render("core"), render("core"));
    }

    #[test]
    fn path_like_namespaces_are_rejected() {
        assert!(matches!(
            DashboardEmitter::new(["core", "../etc"]),
            Err(DomainError::InvalidNamespace(_))
        ));
        assert!(DashboardEmitter::new([""]).is_err());
    }
}
