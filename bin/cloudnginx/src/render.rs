//! Text rendering of the active view.

use std::fmt;

use cloudnginx_client::{App, InputField, View, status};

/// Displays the full screen of an [`App`].
pub struct Screen<'a, A, D>(pub &'a App<A, D>);

impl<A, D> fmt::Display for Screen<'_, A, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let app = self.0;
        let view = app.view();

        writeln!(f, "=== {} ===", view.title())?;

        match view {
            View::Login => {
                writeln!(f, "Username: {}", app.username())?;
                writeln!(f, "Password: {}", "*".repeat(app.password().chars().count()))?;
                write!(f, "[login]")?;
            }
            View::DeveloperConsole => {
                writeln!(f, "Logged in as {} [logout]", app.session().username())?;
                let form = app.form();
                writeln!(
                    f,
                    "Cloud provider: {} ({})",
                    form.cloud_provider().service_name(),
                    form.cloud_provider()
                )?;
                write_field(f, "Domain", form.domain(), "")?;
                write_field(f, "Namespace", form.namespace(), "<default>")?;
                write_field(f, "App name", form.app_name(), "<default>")?;
                write!(f, "[deploy]")?;
            }
            View::AdminConsole => {
                writeln!(
                    f,
                    "Welcome, Admin! Here you can manage users, monitor deployments, and more."
                )?;
                write!(f, "[logout]")?;
            }
            View::UnknownRoleFallback => {
                writeln!(f, "Your role does not have access to any specific features.")?;
                write!(f, "[logout]")?;
            }
        }

        if let Some(error) = app.error() {
            write!(f, "\n! {}", error)?;
        }

        if view.can_deploy() {
            if let Some(fragment) = status::render(app.result()) {
                write!(f, "\n\n{}", fragment)?;
            }
        }

        Ok(())
    }
}

fn write_field(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    field: &InputField,
    placeholder: &str,
) -> fmt::Result {
    let value = if field.value().is_empty() {
        placeholder
    } else {
        field.value()
    };
    write!(f, "{}: {}", label, value)?;
    if !field.error_message().is_empty() && !field.value().is_empty() {
        write!(f, "  <- {}", field.error_message())?;
    }
    writeln!(f)
}
