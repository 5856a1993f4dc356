//! Themed HTML projections of a profile.
//!
//! Templates are compiled into the binary and registered once in a shared
//! [`Tera`] instance. Every theme and the HTML export render from the same
//! [`ProfileView`].

mod view;

pub use crate::model::Theme;
pub use view::{LinkView, ProfileView, SkillView};

use crate::model::Profile;
use folio_core::Error;
use once_cell::sync::Lazy;
use serde::Serialize;
use tera::{Context, Tera};

#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
	#[error("Template set failed to load: {0}")]
	Load(String),

	#[error("Failed to render {template}: {message}")]
	Render { template: String, message: String },
}

impl From<ThemeError> for Error {
	fn from(error: ThemeError) -> Self {
		Error::Template(error.to_string())
	}
}

static TEMPLATES: Lazy<Result<Tera, String>> = Lazy::new(|| {
	let mut tera = Tera::default();
	tera.add_raw_templates(vec![
		("modern.html", include_str!("../../templates/modern.html")),
		("classic.html", include_str!("../../templates/classic.html")),
		("creative.html", include_str!("../../templates/creative.html")),
		("export.html", include_str!("../../templates/export.html")),
	])
	.map_err(|e| format!("{e:?}"))?;
	tera.set_escape_fn(escape_html);
	Ok(tera)
});

/// Escapes text for HTML element content and quoted attributes.
///
/// Unlike Tera's default this leaves `/` alone, so URLs stay readable.
pub(crate) fn escape_html(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	for c in input.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#x27;"),
			_ => out.push(c),
		}
	}
	out
}

/// Renders one of the bundled templates.
pub(crate) fn render_template<T: Serialize>(
	template: &str,
	data: &T,
) -> Result<String, ThemeError> {
	let tera = TEMPLATES
		.as_ref()
		.map_err(|message| ThemeError::Load(message.clone()))?;
	let render_error = |e: tera::Error| ThemeError::Render {
		template: template.to_string(),
		message: format!("{e:?}"),
	};
	let context = Context::from_serialize(data).map_err(render_error)?;
	tera.render(template, &context).map_err(render_error)
}

/// Renders profiles as themed portfolio pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeProjector;

impl ThemeProjector {
	pub fn new() -> Self {
		Self
	}

	/// Renders `profile` as a complete HTML page in `theme`.
	pub fn render(&self, profile: &Profile, theme: Theme) -> Result<String, ThemeError> {
		let view = ProfileView::from_profile(profile);
		let html = match theme {
			Theme::Modern => self.render_modern(&view),
			Theme::Classic => self.render_classic(&view),
			Theme::Creative => self.render_creative(&view),
		}?;
		tracing::debug!(user = %profile.user, %theme, "rendered portfolio page");
		Ok(html)
	}

	/// Renders `profile` in the theme stored on it.
	pub fn render_stored(&self, profile: &Profile) -> Result<String, ThemeError> {
		self.render(profile, profile.fields.theme)
	}

	fn render_modern(&self, view: &ProfileView<'_>) -> Result<String, ThemeError> {
		render_template("modern.html", view)
	}

	fn render_classic(&self, view: &ProfileView<'_>) -> Result<String, ThemeError> {
		render_template("classic.html", view)
	}

	fn render_creative(&self, view: &ProfileView<'_>) -> Result<String, ThemeError> {
		render_template("creative.html", view)
	}
}
