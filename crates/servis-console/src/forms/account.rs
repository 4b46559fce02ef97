use servis_client::{LoginPayload, RegisterPayload};

use crate::validate::{FormErrors, is_email};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email_or_user_name: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginPayload, FormErrors> {
        let mut errors = FormErrors::new();
        errors.require(
            "emailOrUserName",
            &self.email_or_user_name,
            "Lütfen kullanıcı adınızı girin",
        );
        errors.require("password", &self.password, "Lütfen şifrenizi girin");
        errors.finish(|| LoginPayload {
            email_or_user_name: self.email_or_user_name.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub surname: String,
    pub user_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterPayload, FormErrors> {
        let mut errors = FormErrors::new();
        errors.require("name", &self.name, "Ad zorunludur");
        errors.require("surname", &self.surname, "Soyad zorunludur");
        errors.require("userName", &self.user_name, "Kullanıcı adı zorunludur");
        if errors.require("email", &self.email, "E-posta zorunludur") && !is_email(&self.email) {
            errors.push("email", "Geçerli e-posta girin");
        }
        if errors.require("password", &self.password, "Şifre zorunludur") {
            errors.min_chars("password", &self.password, 6, "Şifre en az 6 karakter olmalı");
        }
        errors.finish(|| RegisterPayload {
            name: self.name.trim().to_string(),
            surname: self.surname.trim().to_string(),
            user_name: self.user_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}
