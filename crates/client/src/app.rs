//! The client application state and its event-driven transitions.

use crate::{
    AuthApi, AuthError, CloudProvider, DeployApi, DeployError, DeploymentForm,
    DeploymentFormController, DeploymentResult, Session, SessionController, View,
};

/// A discrete UI event: an input change or a click.
#[derive(Debug, Clone, PartialEq, Eq, strum::AsRefStr)]
pub enum Event {
    UsernameChanged(String),
    PasswordChanged(String),
    LoginClicked,
    LogoutClicked,
    ProviderSelected(CloudProvider),
    DomainChanged(String),
    NamespaceChanged(String),
    AppNameChanged(String),
    DeployClicked,
}

/// The failure behind the error banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Banner {
    Login(AuthError),
    Deploy(DeployError),
}

impl Banner {
    fn user_message(&self) -> &'static str {
        match self {
            Banner::Login(e) => e.user_message(),
            Banner::Deploy(e) => e.user_message(),
        }
    }
}

/// All client state, mutated only through [`App::handle`].
#[derive(Debug)]
pub struct App<A, D> {
    session: SessionController<A>,
    form: DeploymentFormController<D>,
    username: String,
    password: String,
    result: DeploymentResult,
    banner: Option<Banner>,
}

impl<A, D> App<A, D> {
    pub fn new(session: SessionController<A>, form: DeploymentFormController<D>) -> Self {
        Self {
            session,
            form,
            username: String::new(),
            password: String::new(),
            result: DeploymentResult::default(),
            banner: None,
        }
    }

    /// The active view, re-derived from the session on every call.
    pub fn view(&self) -> View {
        View::route(self.session.session())
    }

    pub fn session(&self) -> &Session {
        self.session.session()
    }

    pub fn form(&self) -> &DeploymentForm {
        self.form.form()
    }

    /// Username typed into the login view.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn result(&self) -> &DeploymentResult {
        &self.result
    }

    /// Error banner of the current view, if any.
    pub fn error(&self) -> Option<&'static str> {
        self.banner.map(|banner| banner.user_message())
    }

    fn logout(&mut self) {
        self.session.logout();
        self.username.clear();
        self.password.clear();
        self.form.reset();
        self.result = DeploymentResult::default();
        self.banner = None;
    }

    /// Keep a deploy banner in line with the form after a field edit.
    ///
    /// A form that validates again clears it. A banner from a blocked submit
    /// follows the first field that is still invalid.
    fn revalidate_banner(&mut self) {
        let Some(Banner::Deploy(previous)) = self.banner else {
            return;
        };

        self.banner = match self.form.build_request() {
            Ok(_) => None,
            Err(e) if matches!(previous, DeployError::InvalidRequest(_)) => {
                Some(Banner::Deploy(e.into()))
            }
            Err(_) => Some(Banner::Deploy(previous)),
        };
    }
}

impl<A: AuthApi, D: DeployApi> App<A, D> {
    /// Apply one event. Events that the active view does not offer are ignored.
    pub async fn handle(&mut self, event: Event) {
        let view = self.view();

        match event {
            Event::UsernameChanged(value) if view == View::Login => self.username = value,
            Event::PasswordChanged(value) if view == View::Login => self.password = value,
            Event::LoginClicked if view == View::Login => {
                self.banner = match self.session.login(&self.username, &self.password).await {
                    Ok(_) => None,
                    Err(e) => Some(Banner::Login(e)),
                };
            }
            Event::LogoutClicked if view.can_logout() => self.logout(),
            Event::ProviderSelected(provider) if view.can_deploy() => {
                self.form.set_cloud_provider(provider);
            }
            Event::DomainChanged(value) if view.can_deploy() => {
                self.form.set_domain(value);
                self.revalidate_banner();
            }
            Event::NamespaceChanged(value) if view.can_deploy() => {
                self.form.set_namespace(value);
                self.revalidate_banner();
            }
            Event::AppNameChanged(value) if view.can_deploy() => {
                self.form.set_app_name(value);
                self.revalidate_banner();
            }
            Event::DeployClicked if view.can_deploy() => self.deploy().await,
            event => {
                let name: &str = event.as_ref();
                tracing::debug!(
                    event = name,
                    view = %view,
                    "Ignoring event not offered by the active view"
                );
            }
        }
    }

    async fn deploy(&mut self) {
        let token = self.session.session().access_token().cloned();
        match self.form.submit(token.as_ref()).await {
            Ok(result) => {
                self.result = result;
                self.banner = None;
            }
            Err(e) => self.banner = Some(Banner::Deploy(e)),
        }
    }
}
