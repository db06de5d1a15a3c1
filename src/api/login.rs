//! Login pages. Credential checks belong to the hosting app.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;

use crate::config::LoginStyle;
use crate::i18n::{Login02Labels, LoginLabels};
use crate::views::routes::{LOGIN, REGISTER, RESET_PASSWORD};
use crate::views::{Page, PageData, ViewContext};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Login01Page {
    #[serde(flatten)]
    pub page: PageData,
    pub content_template: String,
    pub labels: LoginLabels,
    pub redirect_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Login02Page {
    #[serde(flatten)]
    pub page: PageData,
    pub content_template: String,
    pub labels: Login02Labels,
    pub redirect_url: String,
    pub login_post_url: String,
    pub register_url: String,
    pub forgot_url: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LoginPage {
    Simple(Login01Page),
    Split(Login02Page),
}

fn login_page(ctx: &ViewContext, style: LoginStyle, redirect_url: &str) -> Page<LoginPage> {
    let labels = ctx.i18n.labels();

    match style {
        LoginStyle::Simple => Page::new(
            "login01",
            LoginPage::Simple(Login01Page {
                page: ctx.page(&labels.login.title, "", ""),
                content_template: "login01-content".to_string(),
                labels: labels.login.clone(),
                redirect_url: redirect_url.to_string(),
            }),
        ),
        LoginStyle::Split => Page::new(
            "login02",
            LoginPage::Split(Login02Page {
                page: ctx.page(&labels.login02.title, "", ""),
                content_template: "login02-content".to_string(),
                labels: labels.login02.clone(),
                redirect_url: redirect_url.to_string(),
                login_post_url: LOGIN.to_string(),
                register_url: REGISTER.to_string(),
                forgot_url: RESET_PASSWORD.to_string(),
            }),
        ),
    }
}

/// GET /login
pub async fn login_form(State(state): State<AppState>, ctx: ViewContext) -> Page<LoginPage> {
    login_page(&ctx, state.config.login_style, &state.config.login_redirect)
}

/// POST /login - 303 to the configured landing page.
pub async fn login_submit(State(state): State<AppState>) -> Response {
    Redirect::to(&state.config.login_redirect).into_response()
}
