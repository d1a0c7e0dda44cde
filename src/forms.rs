//! 表单校验模块
//!
//! 校验在调用数据服务之前完成，所有错误汇总为一条提示。

use std::fmt;

const MIN_NAME_LEN: usize = 4;
const MIN_EMAIL_LEN: usize = 7;
const MIN_PASSWORD_LEN: usize = 4;

/// 汇总的校验错误
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    fn push(&mut self, message: &str) {
        self.0.push(message.to_string());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn joined(&self, separator: &str) -> String {
        self.0.join(separator)
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.joined(" "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.email.chars().count() < MIN_EMAIL_LEN {
            errors.push("Enter a valid email.");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push("Enter a valid password.");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.name.chars().count() < MIN_NAME_LEN {
            errors.push("Enter your complete name.");
        }
        if self.email.chars().count() < MIN_EMAIL_LEN {
            errors.push("Enter a valid email.");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push("Enter a valid password.");
        }
        if self.password != self.password_confirm {
            errors.push("Passwords do not match.");
        }
        errors.into_result()
    }
}
