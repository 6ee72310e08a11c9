//! Server-rendered HTML shells for the dashboard, SKU detail and login pages.
//!
//! Each page embeds a JSON bootstrap object carrying the viewer's UI flags
//! and lets the inline client fetch everything else from the API.

use axum::response::Html;
use merch_core::access::{PageFlags, Viewer};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};

/// Base path of the JSON API the pages call.
const API_BASE: &str = "/api";

/// Bootstrap object read by the page scripts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBootstrap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku_id: Option<String>,
    /// Where the login page sends the browser afterwards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    pub can_add_note: bool,
    pub is_merch_ops: bool,
    pub api_base: &'static str,
}

impl PageBootstrap {
    fn new(viewer: &Viewer, sku_id: Option<String>) -> Self {
        let flags = PageFlags::for_viewer(viewer);
        Self {
            sku_id,
            next: None,
            can_add_note: flags.can_add_note,
            is_merch_ops: flags.is_merch_ops,
            api_base: API_BASE,
        }
    }
}

/// Serialize the bootstrap for embedding inside a `<script>` element.
///
/// `<` is escaped so a SKU id can never close the element early.
fn bootstrap_json(bootstrap: &PageBootstrap) -> AppResult<String> {
    let json = serde_json::to_string(bootstrap)
        .map_err(|e| AppError::InternalError(format!("Bootstrap serialization error: {e}")))?;
    Ok(json.replace('<', "\\u003c"))
}

/// Only same-site absolute paths are honoured as a post-login target.
fn safe_next(next: Option<&str>) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}

fn render(title: &str, bootstrap: &PageBootstrap, script: &str) -> AppResult<Html<String>> {
    let data = bootstrap_json(bootstrap)?;
    Ok(Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<main id="app"></main>
<script id="bootstrap" type="application/json">{data}</script>
<script>
{PRELUDE}
{script}
</script>
</body>
</html>
"#
    )))
}

/// Shared client helpers. API strings only ever reach the DOM as text nodes
/// through `el`.
const PRELUDE: &str = r#"
const BOOT = JSON.parse(document.getElementById("bootstrap").textContent);
const app = document.getElementById("app");
function el(tag, attrs, ...children) {
  const node = document.createElement(tag);
  Object.entries(attrs || {}).forEach(([k, v]) => node.setAttribute(k, v));
  children.forEach((c) => node.append(c));
  return node;
}
async function api(path, init) {
  const res = await fetch(BOOT.apiBase + path, Object.assign({credentials: "same-origin"}, init));
  const body = await res.json();
  if (!res.ok) {
    const err = new Error(body.error);
    err.status = res.status;
    throw err;
  }
  return body;
}
function postJson(path, payload) {
  return api(path, {method: "POST", headers: {"Content-Type": "application/json"},
    body: JSON.stringify(payload)});
}
function fail(e) {
  app.replaceChildren(el("p", null, e.message));
  if (e.status === 401) {
    const next = encodeURIComponent(location.pathname + location.search);
    app.append(el("a", {href: "/login/?next=" + next}, "Log in"));
  }
}
"#;

const DASHBOARD_SCRIPT: &str = r#"
function pageHref(n) {
  const q = new URLSearchParams(location.search);
  q.set("page", n);
  return "?" + q;
}
api("/skus/" + location.search).then((page) => {
  const head = el("tr", null,
    ...["SKU", "Name", "Sales", "Return %", "Content score"].map((h) => el("th", null, h)));
  const rows = page.results.map((s) => el("tr", null,
    el("td", null, el("a", {href: "/skus/" + encodeURIComponent(s.sku_id) + "/"}, s.sku_id)),
    el("td", null, s.name),
    el("td", null, String(s.sales)),
    el("td", null, String(s.return_percentage)),
    el("td", null, String(s.content_score))));
  const nav = el("p");
  if (page.previous) nav.append(el("a", {href: pageHref(page.previous)}, "Previous"), " ");
  if (page.next) nav.append(el("a", {href: pageHref(page.next)}, "Next"));
  app.replaceChildren(el("h1", null, "SKUs (" + page.count + ")"), el("table", null, head, ...rows), nav);
}).catch(fail);
"#;

const DETAIL_SCRIPT: &str = r#"
const base = "/skus/" + encodeURIComponent(BOOT.skuId) + "/";
api(base).then((sku) => {
  const notes = el("ul", null, ...sku.notes.map((n) => el("li", null, n.created_at + ": " + n.text)));
  const days = el("ul", null,
    ...sku.daily_metrics.map((d) => el("li", null, d.date + ": " + d.sales_units)));
  app.replaceChildren(el("h1", null, sku.name + " (" + sku.sku_id + ")"), el("h2", null, "Notes"), notes);
  if (BOOT.canAddNote) {
    const text = el("textarea", {name: "text"});
    const status = el("p");
    const form = el("form", null, text, el("button", null, "Add note"), status);
    form.addEventListener("submit", (ev) => {
      ev.preventDefault();
      postJson(base + "notes/", {text: text.value})
        .then(() => location.reload())
        .catch((e) => { status.textContent = e.message; });
    });
    app.append(form);
  }
  app.append(el("h2", null, "Daily sales"), days);
}).catch(fail);
"#;

const LOGIN_SCRIPT: &str = r#"
const username = el("input", {name: "username", autocomplete: "username"});
const password = el("input", {name: "password", type: "password", autocomplete: "current-password"});
const message = el("p");
const form = el("form", null,
  el("label", null, "Username ", username),
  el("label", null, "Password ", password),
  el("button", null, "Log in"),
  message);
form.addEventListener("submit", (ev) => {
  ev.preventDefault();
  postJson("/auth/login/", {username: username.value, password: password.value})
    .then(() => { location.href = BOOT.next; })
    .catch((e) => { message.textContent = e.message; });
});
app.replaceChildren(el("h1", null, "Log in"), form);
"#;

#[derive(Debug, Default, Deserialize)]
pub struct LoginPageParams {
    pub next: Option<String>,
}

/// GET /
///
/// Open to anonymous visitors; their flags are all false.
pub async fn dashboard(viewer: MaybeAuthUser) -> AppResult<Html<String>> {
    let bootstrap = PageBootstrap::new(&viewer.to_viewer(), None);
    render("SKU Dashboard", &bootstrap, DASHBOARD_SCRIPT)
}

/// GET /skus/{sku_id}/
///
/// Requires login. The SKU itself is loaded client-side, so an unknown id
/// still renders the shell.
pub async fn sku_detail(
    auth: AuthUser,
    AppPath(sku_id): AppPath<String>,
) -> AppResult<Html<String>> {
    let bootstrap = PageBootstrap::new(&auth.to_viewer(), Some(sku_id));
    render("SKU Detail", &bootstrap, DETAIL_SCRIPT)
}

/// GET /login/?next=
///
/// Login form posting to the API. On success the browser holds the session
/// cookie and moves on to `next`.
pub async fn login(AppQuery(params): AppQuery<LoginPageParams>) -> AppResult<Html<String>> {
    let mut bootstrap = PageBootstrap::new(&Viewer::Anonymous, None);
    bootstrap.next = Some(safe_next(params.next.as_deref()));
    render("Log in", &bootstrap, LOGIN_SCRIPT)
}
