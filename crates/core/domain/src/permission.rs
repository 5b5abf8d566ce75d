//! 权限键：`module.submodule.component.action` 四段点分路径，授权的最小单元。

use std::fmt;
use std::str::FromStr;

/// 路径分隔符。
pub const KEY_SEPARATOR: char = '.';

/// 权限键或编码格式错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionKeyError {
    #[error("code must not be empty")]
    EmptyCode,
    #[error("code `{0}` contains a separator or whitespace")]
    InvalidCode(String),
    #[error("permission key `{0}` must have exactly 4 segments")]
    SegmentCount(String),
}

/// 校验单级编码：非空、不含 `.`、不含空白。
pub fn validate_code(code: &str) -> Result<(), PermissionKeyError> {
    if code.is_empty() {
        return Err(PermissionKeyError::EmptyCode);
    }
    if code
        .chars()
        .any(|ch| ch == KEY_SEPARATOR || ch.is_whitespace())
    {
        return Err(PermissionKeyError::InvalidCode(code.to_string()));
    }
    Ok(())
}

/// 原始请求字符串的模块段（第一个 `.` 之前的部分）。
///
/// 不做格式校验，格式错误的请求同样先经过模块资格判定。
pub fn module_segment(raw: &str) -> &str {
    raw.split(KEY_SEPARATOR).next().unwrap_or_default()
}

/// 权限键。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PermissionKey {
    module: String,
    submodule: String,
    component: String,
    action: String,
}

impl PermissionKey {
    /// 由四级编码构造，逐段校验。
    pub fn new(
        module: impl Into<String>,
        submodule: impl Into<String>,
        component: impl Into<String>,
        action: impl Into<String>,
    ) -> Result<Self, PermissionKeyError> {
        let key = Self {
            module: module.into(),
            submodule: submodule.into(),
            component: component.into(),
            action: action.into(),
        };
        for code in [&key.module, &key.submodule, &key.component, &key.action] {
            validate_code(code)?;
        }
        Ok(key)
    }

    /// 解析点分字符串。
    pub fn parse(raw: &str) -> Result<Self, PermissionKeyError> {
        let parts: Vec<&str> = raw.split(KEY_SEPARATOR).collect();
        match parts.as_slice() {
            [module, submodule, component, action] => {
                Self::new(*module, *submodule, *component, *action)
            }
            _ => Err(PermissionKeyError::SegmentCount(raw.to_string())),
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn submodule(&self) -> &str {
        &self.submodule
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn action(&self) -> &str {
        &self.action
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.module, self.submodule, self.component, self.action
        )
    }
}

impl FromStr for PermissionKey {
    type Err = PermissionKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}
