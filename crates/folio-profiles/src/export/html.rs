use crate::model::Profile;
use crate::themes::{ProfileView, ThemeError, render_template};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
struct ExportPage<'a> {
	#[serde(flatten)]
	view: ProfileView<'a>,
	generated_on: String,
	view_online_url: String,
}

/// Public page URL for `user` under `public_base_url`.
///
/// # Examples
///
/// ```
/// use folio_profiles::export::view_online_url;
/// use uuid::Uuid;
///
/// let user = Uuid::nil();
/// assert_eq!(
///     view_online_url("https://folio.example/", user),
///     "https://folio.example/portfolio/00000000-0000-0000-0000-000000000000"
/// );
/// ```
pub fn view_online_url(public_base_url: &str, user: Uuid) -> String {
	format!("{}/portfolio/{user}", public_base_url.trim_end_matches('/'))
}

/// Renders the standalone HTML download for `profile`.
pub fn render_html(
	profile: &Profile,
	generated_at: DateTime<Utc>,
	public_base_url: &str,
) -> Result<String, ThemeError> {
	let page = ExportPage {
		view: ProfileView::from_profile(profile),
		generated_on: generated_at.format("%B %-d, %Y").to_string(),
		view_online_url: view_online_url(public_base_url, profile.user),
	};
	render_template("export.html", &page)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{Experience, ProfileFields};
	use chrono::TimeZone;
	use rstest::rstest;

	fn profile(fields: ProfileFields) -> Profile {
		Profile {
			id: Uuid::new_v4(),
			user: Uuid::nil(),
			fields,
			created_at: Utc::now(),
			updated_at: Utc::now(),
		}
	}

	#[rstest]
	fn test_footer_has_date_and_view_online_link() {
		let profile = profile(ProfileFields::new("Ada", "Engineer"));
		let at = Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap();

		let html = render_html(&profile, at, "http://localhost:5000").unwrap();

		assert!(html.contains("Portfolio generated on March 9, 2024"));
		assert!(html.contains(
			r#"href="http://localhost:5000/portfolio/00000000-0000-0000-0000-000000000000""#
		));
		assert!(html.contains("<title>Ada - Portfolio</title>"));
	}

	#[rstest]
	fn test_empty_sections_are_left_out() {
		let html = render_html(
			&profile(ProfileFields::new("Ada", "Engineer")),
			Utc::now(),
			"http://localhost:5000",
		)
		.unwrap();

		for marker in [
			"section-contact",
			"section-skills",
			"section-projects",
			"section-experience",
			"section-education",
			"section-social",
			"section-hobbies",
		] {
			assert!(!html.contains(marker), "{marker} rendered while empty");
		}
	}

	#[rstest]
	fn test_populated_sections_render() {
		let mut fields = ProfileFields::new("Ada", "Engineer");
		fields.phone = Some("555-0100".into());
		fields.experience = vec![Experience {
			title: "Engineer".into(),
			company: "Acme".into(),
			duration: "2020-2024".into(),
			description: Some("Built engines".into()),
		}];
		fields.hobbies = vec!["Chess".into(), "Hiking".into()];

		let html = render_html(&profile(fields), Utc::now(), "http://localhost:5000").unwrap();

		assert!(html.contains("section-contact"));
		assert!(html.contains("Engineer at Acme"));
		assert!(html.contains("Chess • Hiking"));
		assert!(!html.contains("section-skills"));
	}
}
