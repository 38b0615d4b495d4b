//! Presentation of a completed deployment.

use std::fmt;

use crate::DeploymentResult;

/// An outbound link that opens in a new context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub text: String,
    pub target: &'static str,
    pub rel: &'static str,
}

/// The success fragment displayed once a public URL is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFragment {
    pub heading: &'static str,
    pub caption: &'static str,
    pub link: Link,
}

/// Render the deployment status, or nothing while no public URL exists.
pub fn render(result: &DeploymentResult) -> Option<ViewFragment> {
    if result.is_empty() {
        return None;
    }

    Some(ViewFragment {
        heading: "Deployment Successful!",
        caption: "Access your Nginx instance at:",
        link: Link {
            href: result.public_url.clone(),
            text: result.public_url.clone(),
            target: "_blank",
            rel: "noopener noreferrer",
        },
    })
}

impl fmt::Display for ViewFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        write!(f, "{} {}", self.caption, self.link.href)
    }
}
