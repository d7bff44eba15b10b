//! Wire shapes for the reqres-style users API.
//!
//! Responses decode into these DTOs first, then map into domain records in
//! one pass.

use pagination::Page;
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::domain::{
    AuthToken, CreatedUser, RegisteredAccount, SupportBanner, UpdatedUser, UserDetail, UserId,
    UserRecord, UsersPage,
};

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: i64,
    pub(super) email: String,
    pub(super) first_name: String,
    pub(super) last_name: String,
    #[serde(default)]
    pub(super) avatar: Option<String>,
}

impl UserDto {
    fn into_domain(self) -> Result<UserRecord, String> {
        let id = u64::try_from(self.id).map_err(|_| format!("user id {} is negative", self.id))?;
        let avatar = self.avatar.and_then(|raw| match Url::parse(&raw) {
            Ok(url) => Some(url),
            Err(error) => {
                warn!(user_id = id, %error, "dropping unparsable avatar URL");
                None
            }
        });
        Ok(UserRecord::new(
            UserId::new(id),
            self.first_name,
            self.last_name,
            self.email,
            avatar,
        ))
    }
}

pub(super) fn page_into_domain(page: Page<UserDto>) -> Result<UsersPage, String> {
    page.try_map(UserDto::into_domain)
}

#[derive(Debug, Deserialize)]
pub(super) struct SupportDto {
    pub(super) url: String,
    pub(super) text: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDetailDto {
    pub(super) data: UserDto,
    #[serde(default)]
    pub(super) support: Option<SupportDto>,
}

impl UserDetailDto {
    pub(super) fn into_domain(self) -> Result<UserDetail, String> {
        Ok(UserDetail {
            user: self.data.into_domain()?,
            support: self.support.map(|support| SupportBanner {
                url: support.url,
                text: support.text,
            }),
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct UserDraftBody<'a> {
    pub(super) name: &'a str,
    pub(super) job: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreatedUserDto {
    pub(super) id: String,
    pub(super) name: String,
    pub(super) job: String,
    pub(super) created_at: String,
}

impl From<CreatedUserDto> for CreatedUser {
    fn from(dto: CreatedUserDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            job: dto.job,
            created_at: dto.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdatedUserDto {
    pub(super) name: String,
    pub(super) job: String,
    pub(super) updated_at: String,
}

impl From<UpdatedUserDto> for UpdatedUser {
    fn from(dto: UpdatedUserDto) -> Self {
        Self {
            name: dto.name,
            job: dto.job,
            updated_at: dto.updated_at,
        }
    }
}

#[derive(Serialize)]
pub(super) struct CredentialsBody<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
pub(super) struct TokenDto {
    pub(super) token: String,
}

#[derive(Deserialize)]
pub(super) struct RegisteredDto {
    pub(super) id: u64,
    pub(super) token: String,
}

impl From<RegisteredDto> for RegisteredAccount {
    fn from(dto: RegisteredDto) -> Self {
        Self {
            id: UserId::new(dto.id),
            token: AuthToken::new(dto.token),
        }
    }
}
