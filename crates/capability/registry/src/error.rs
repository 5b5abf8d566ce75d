//! 注册表加载错误。
//!
//! 全部属于启动期致命配置错误，运行期不做恢复。

use domain::PermissionKeyError;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read registry file `{path}`")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("registry parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid code at `{path}`: {source}")]
    InvalidCode {
        path: String,
        #[source]
        source: PermissionKeyError,
    },

    #[error("duplicate module code `{0}`")]
    DuplicateModule(String),

    #[error("duplicate submodule `{submodule}` in module `{module}`")]
    DuplicateSubmodule { module: String, submodule: String },

    #[error("duplicate component `{component}` in `{parent}`")]
    DuplicateComponent { parent: String, component: String },

    #[error("duplicate action `{action}` in `{parent}`")]
    DuplicateAction { parent: String, action: String },

    #[error("module `{module}` has invalid min_plan `{value}`")]
    InvalidPlan { module: String, value: String },

    #[error("invalid {field} `{value}` at `{path}`")]
    InvalidAttribute {
        path: String,
        field: &'static str,
        value: String,
    },

    #[error("module `{module}` depends on unknown module `{dependency}`")]
    DanglingDependency { module: String, dependency: String },

    #[error("module `{0}` depends on itself")]
    SelfDependency(String),

    #[error("dependency cycle detected: {}", .0.join(" -> "))]
    DependencyCycle(Vec<String>),
}
