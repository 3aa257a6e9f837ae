//! End-to-end pipeline tests over the real adapters.

use std::fs;
use std::path::{Path, PathBuf};

use stackgen_adapters::{LocalFilesystem, MemoryFilesystem, StaticProbe, YamlRegistry};
use stackgen_core::{
    application::ApplicationError,
    domain::{ArtifactKind, DomainError, WritePolicy, layout::SKELETON_DIRS},
    emitters::DockerfileEmitter,
    error::StackgenError,
    prelude::*,
};
use tempfile::TempDir;

const FOO_REGISTRY: &str = "\
services:
  - name: foo
    path: services/foo
    language: go
    port: 8080
    namespace: core
    team: x
";

fn all_tools() -> StaticProbe {
    StaticProbe::with_tools(["envsubst", "kubectl", "helm"])
}

fn seed_shared(root: &Path) {
    fs::create_dir_all(root.join("shared/schemas")).unwrap();
    fs::create_dir_all(root.join("shared/locales")).unwrap();
    fs::write(root.join("shared/schemas/common.yaml"), "openapi: 3.0.0\n").unwrap();
    fs::write(root.join("shared/locales/en.json"), "{}\n").unwrap();
}

fn local_repo(registry: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("registry")).unwrap();
    fs::write(tmp.path().join("registry/services.yaml"), registry).unwrap();
    seed_shared(tmp.path());
    tmp
}

fn local_service(root: &Path, probe: StaticProbe) -> ScaffoldService {
    ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(YamlRegistry::new()),
        Box::new(probe),
        PipelineSettings::with_root(root),
    )
    .unwrap()
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

/// Every regular file under `root`, relative and sorted.
fn tree(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                out.push(path.strip_prefix(root).unwrap().to_path_buf());
            }
        }
    }
    out.sort();
    out
}

// ── generation ───────────────────────────────────────────────────────────────

#[test]
fn foo_registry_generates_expected_artifacts() {
    let repo = local_repo(FOO_REGISTRY);
    let root = repo.path();
    let report = local_service(root, all_tools()).run().unwrap();

    assert_eq!(report.services, vec!["foo"]);

    for dir in SKELETON_DIRS {
        assert!(root.join("services/foo").join(dir).is_dir(), "missing {dir}");
    }

    let dockerfile = read(root, "services/foo/Dockerfile");
    assert!(dockerfile.contains("FROM go:latest"));
    let expose: Vec<_> = dockerfile
        .lines()
        .filter(|l| l.starts_with("EXPOSE"))
        .collect();
    assert_eq!(expose, vec!["EXPOSE 8080"]);

    assert!(read(root, "infrastructure/helm/charts/foo/values.yaml").contains("port: 8080"));
    assert!(root.join("infrastructure/helm/charts/foo/Chart.yaml").is_file());
    assert!(root.join("infrastructure/argo/applications/foo.yaml").is_file());
    assert!(root.join(".github/workflows/foo.yml").is_file());
    assert_eq!(read(root, "services/foo/README.md"), "");
}

#[test]
fn rerun_is_idempotent_and_keeps_readme() {
    let repo = local_repo(FOO_REGISTRY);
    let root = repo.path();
    let service = local_service(root, all_tools());
    service.run().unwrap();

    fs::write(root.join("services/foo/README.md"), "# foo\nhand written\n").unwrap();
    let snapshot = |rel: &str| read(root, rel);
    let dockerfile = snapshot("services/foo/Dockerfile");
    let values = snapshot("infrastructure/helm/charts/foo/values.yaml");
    let argo = snapshot("infrastructure/argo/applications/foo.yaml");

    let second = service.run().unwrap();

    assert_eq!(read(root, "services/foo/README.md"), "# foo\nhand written\n");
    assert_eq!(snapshot("services/foo/Dockerfile"), dockerfile);
    assert_eq!(
        snapshot("infrastructure/helm/charts/foo/values.yaml"),
        values
    );
    assert_eq!(snapshot("infrastructure/argo/applications/foo.yaml"), argo);
    assert!(
        second
            .preserved
            .contains(&PathBuf::from("services/foo/README.md"))
    );
}

#[test]
fn manual_dockerfile_edits_are_overwritten() {
    let repo = local_repo(FOO_REGISTRY);
    let root = repo.path();
    let service = local_service(root, all_tools());
    service.run().unwrap();

    fs::write(root.join("services/foo/Dockerfile"), "FROM scratch\n").unwrap();
    service.run().unwrap();
    assert!(read(root, "services/foo/Dockerfile").starts_with("FROM go:latest"));
}

#[test]
fn existing_workflow_is_untouched() {
    let repo = local_repo(FOO_REGISTRY);
    let root = repo.path();
    fs::create_dir_all(root.join(".github/workflows")).unwrap();
    let custom = "name: custom\n# arbitrary \u{00e9} content {{PORT}}\n";
    fs::write(root.join(".github/workflows/foo.yml"), custom).unwrap();

    let report = local_service(root, all_tools()).run().unwrap();

    assert_eq!(read(root, ".github/workflows/foo.yml"), custom);
    assert!(
        report
            .preserved
            .contains(&PathBuf::from(".github/workflows/foo.yml"))
    );
}

// ── prerequisites ────────────────────────────────────────────────────────────

#[test]
fn missing_tools_abort_before_any_output() {
    let repo = local_repo(FOO_REGISTRY);
    let root = repo.path();
    let before = tree(root);

    let err = local_service(root, StaticProbe::none()).run().unwrap_err();

    assert_eq!(
        err,
        StackgenError::Application(ApplicationError::MissingPrerequisites {
            tools: vec!["envsubst".into(), "kubectl".into(), "helm".into()],
        })
    );
    assert_eq!(tree(root), before);
}

// ── registry errors ──────────────────────────────────────────────────────────

#[test]
fn incomplete_record_fails_before_writing() {
    let repo = local_repo(
        "services:\n  - name: foo\n    path: services/foo\n    language: go\n    port: 8080\n    namespace: core\n",
    );
    let root = repo.path();
    let before = tree(root);

    let err = local_service(root, all_tools()).run().unwrap_err();
    assert!(matches!(
        err,
        StackgenError::Domain(DomainError::MissingField { field: "team", .. })
    ));
    assert_eq!(tree(root), before);
}

#[test]
fn missing_registry_is_reported() {
    let tmp = TempDir::new().unwrap();
    let err = local_service(tmp.path(), all_tools()).run().unwrap_err();
    assert!(matches!(
        err,
        StackgenError::Application(ApplicationError::RegistryNotFound { .. })
    ));
}

// ── schema sync ──────────────────────────────────────────────────────────────

#[test]
fn schemas_reach_every_api_dir_including_unregistered() {
    let repo = local_repo(FOO_REGISTRY);
    let root = repo.path();
    fs::create_dir_all(root.join("services/legacy/api")).unwrap();

    let report = local_service(root, all_tools()).run().unwrap();

    for dir in ["services/foo/api", "services/legacy/api"] {
        assert_eq!(read(root, &format!("{dir}/common.yaml")), "openapi: 3.0.0\n");
        assert_eq!(read(root, &format!("{dir}/en.json")), "{}\n");
    }
    assert_eq!(report.schema_copies, 4);
}

#[test]
fn missing_schema_source_fails_the_run() {
    let repo = local_repo(FOO_REGISTRY);
    let root = repo.path();
    fs::remove_file(root.join("shared/locales/en.json")).unwrap();

    let err = local_service(root, all_tools()).run().unwrap_err();
    assert!(matches!(
        err,
        StackgenError::Application(ApplicationError::SchemaSourceMissing { .. })
    ));
}

// ── dashboards ───────────────────────────────────────────────────────────────

#[test]
fn dashboards_follow_fixed_list_even_for_empty_registry() {
    let repo = local_repo("services: []\n");
    let root = repo.path();

    let report = local_service(root, all_tools()).run().unwrap();

    let mut dashboards: Vec<_> = fs::read_dir(root.join("infrastructure/monitoring/grafana/dashboards"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    dashboards.sort();
    assert_eq!(
        dashboards,
        vec!["core.json", "data.json", "edge.json", "platform.json"]
    );
    assert_eq!(report.dashboards, 4);
    assert!(report.services.is_empty());
}

#[test]
fn dashboards_ignore_registry_namespaces() {
    let repo = local_repo(&FOO_REGISTRY.replace("namespace: core", "namespace: payments"));
    let root = repo.path();
    local_service(root, all_tools()).run().unwrap();

    assert!(
        !root
            .join("infrastructure/monitoring/grafana/dashboards/payments.json")
            .exists()
    );
}

// ── in-memory runs and policies ──────────────────────────────────────────────

fn memory_service(mem: &MemoryFilesystem, settings: PipelineSettings) -> ScaffoldService {
    ScaffoldService::new(
        Box::new(mem.clone()),
        Box::new(YamlRegistry::new()),
        Box::new(all_tools()),
        settings,
    )
    .unwrap()
}

#[test]
fn preserve_policy_can_be_applied_to_any_kind() {
    let mem = MemoryFilesystem::new();
    mem.insert_file("/repo/registry/services.yaml", FOO_REGISTRY);
    mem.insert_file("/repo/services/foo/Dockerfile", "FROM custom\n");

    let settings = PipelineSettings {
        policies: PolicyTable::default().with_policy(ArtifactKind::Dockerfile, WritePolicy::Preserve),
        schema_files: Vec::new(),
        ..PipelineSettings::with_root("/repo")
    };
    memory_service(&mem, settings).run().unwrap();

    assert_eq!(
        mem.read_file(Path::new("/repo/services/foo/Dockerfile"))
            .as_deref(),
        Some("FROM custom\n")
    );
}

#[test]
fn numeric_team_and_name_are_accepted() {
    let mem = MemoryFilesystem::new();
    mem.insert_file(
        "/repo/registry/services.yaml",
        "services:\n  - {name: 2048, path: services/2048, language: go, port: 8080, namespace: core, team: 42}\n",
    );
    let settings = PipelineSettings {
        schema_files: Vec::new(),
        ..PipelineSettings::with_root("/repo")
    };
    let report = memory_service(&mem, settings).run().unwrap();

    assert_eq!(report.services, vec!["2048"]);
    assert!(mem.exists(Path::new("/repo/services/2048/Dockerfile")));
}

#[test]
fn custom_emitter_set_replaces_builtins() {
    let mem = MemoryFilesystem::new();
    mem.insert_file("/repo/registry/services.yaml", FOO_REGISTRY);

    let settings = PipelineSettings {
        schema_files: Vec::new(),
        dashboard_namespaces: Vec::new(),
        ..PipelineSettings::with_root("/repo")
    };
    let emitters =
        EmitterRegistry::new().with(DockerfileEmitter::new(EmitterSettings::default()));
    memory_service(&mem, settings)
        .with_emitters(emitters)
        .run()
        .unwrap();

    assert_eq!(
        mem.list_files(),
        vec![
            PathBuf::from("/repo/registry/services.yaml"),
            PathBuf::from("/repo/services/foo/Dockerfile"),
            PathBuf::from("/repo/services/foo/README.md"),
        ]
    );
}

#[test]
fn services_are_processed_in_registry_order() {
    let mem = MemoryFilesystem::new();
    mem.insert_file(
        "/repo/registry/services.yaml",
        "services:\n\
         \x20 - {name: zeta, path: services/zeta, language: rust, port: 9001, namespace: edge, team: a}\n\
         \x20 - {name: alpha, path: apps/alpha, language: node, port: \"3000\", namespace: core, team: b}\n",
    );

    let settings = PipelineSettings {
        schema_files: Vec::new(),
        ..PipelineSettings::with_root("/repo")
    };
    let report = memory_service(&mem, settings).run().unwrap();

    assert_eq!(report.services, vec!["zeta", "alpha"]);
    let values = mem
        .read_file(Path::new(
            "/repo/infrastructure/helm/charts/alpha/values.yaml",
        ))
        .unwrap();
    assert!(values.contains("port: 3000"));
    // `apps/alpha/api` is outside `services/`, so it gets no schema copies.
    assert!(!mem.exists(Path::new("/repo/apps/alpha/api/common.yaml")));
}

#[test]
fn invalid_dashboard_namespace_is_rejected_at_construction() {
    let settings = PipelineSettings {
        dashboard_namespaces: vec!["core".into(), "../../etc".into()],
        ..PipelineSettings::with_root("/repo")
    };
    let result = ScaffoldService::new(
        Box::new(MemoryFilesystem::new()),
        Box::new(YamlRegistry::new()),
        Box::new(all_tools()),
        settings,
    );
    assert!(matches!(
        result,
        Err(StackgenError::Domain(DomainError::InvalidNamespace(_)))
    ));
}
