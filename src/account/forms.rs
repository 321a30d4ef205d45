use crate::account::error::FlowError;
use crate::account::validation::{is_any_empty, normalize_email, validate_email};
use crate::api::types::{ChangePasswordRequest, SignInRequest, SignUpRequest, UpdateUserRequest};

const REQUIRED: &str = "All fields are required";
const INVALID_EMAIL: &str = "Please enter valid E-Mail Address";

#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub(crate) fn into_request(self) -> Result<SignInRequest, FlowError> {
        if is_any_empty(&[self.email.as_str(), self.password.as_str()]) {
            return Err(FlowError::Validation(REQUIRED.to_string()));
        }
        Ok(SignInRequest {
            email: normalize_email(&self.email),
            password: self.password.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl SignUpForm {
    pub(crate) fn into_request(self) -> Result<SignUpRequest, FlowError> {
        if is_any_empty(&[
            self.email.as_str(),
            self.password.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
        ]) {
            return Err(FlowError::Validation(REQUIRED.to_string()));
        }
        if !validate_email(&self.email) {
            return Err(FlowError::Validation(INVALID_EMAIL.to_string()));
        }
        Ok(SignUpRequest {
            email: normalize_email(&self.email),
            password: self.password.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProfileForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UpdateProfileForm {
    pub(crate) fn into_request(self, id: &str) -> Result<UpdateUserRequest, FlowError> {
        if is_any_empty(&[
            self.email.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
        ]) {
            return Err(FlowError::Validation(REQUIRED.to_string()));
        }
        if !validate_email(&self.email) {
            return Err(FlowError::Validation(INVALID_EMAIL.to_string()));
        }
        Ok(UpdateUserRequest {
            email: normalize_email(&self.email),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            id: id.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChangePasswordForm {
    pub old_password: String,
    pub new_password: String,
}

impl ChangePasswordForm {
    pub(crate) fn into_request(self, id: &str) -> Result<ChangePasswordRequest, FlowError> {
        if is_any_empty(&[self.old_password.as_str(), self.new_password.as_str()]) {
            return Err(FlowError::Validation(REQUIRED.to_string()));
        }
        Ok(ChangePasswordRequest {
            old_password: self.old_password.trim().to_string(),
            new_password: self.new_password.trim().to_string(),
            id: id.to_string(),
        })
    }
}
