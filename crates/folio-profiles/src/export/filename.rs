use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fmt;

/// RFC 5987 `attr-char`, everything else is percent-encoded.
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'!')
	.remove(b'#')
	.remove(b'$')
	.remove(b'&')
	.remove(b'+')
	.remove(b'-')
	.remove(b'.')
	.remove(b'^')
	.remove(b'_')
	.remove(b'`')
	.remove(b'|')
	.remove(b'~');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
	Html,
	Json,
}

impl ExportFormat {
	pub fn extension(&self) -> &'static str {
		match self {
			ExportFormat::Html => "html",
			ExportFormat::Json => "json",
		}
	}

	pub fn content_type(&self) -> &'static str {
		match self {
			ExportFormat::Html => "text/html; charset=utf-8",
			ExportFormat::Json => "application/json",
		}
	}
}

impl fmt::Display for ExportFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.extension())
	}
}

/// File name offered for a download.
///
/// # Examples
///
/// ```
/// use folio_profiles::export::{download_filename, ExportFormat};
///
/// let html = download_filename("Ada  Lovelace", ExportFormat::Html);
/// assert_eq!(html, "Ada_Lovelace_portfolio.html");
/// assert_eq!(download_filename("Ada", ExportFormat::Json), "Ada_portfolio.json");
/// ```
pub fn download_filename(name: &str, format: ExportFormat) -> String {
	let stem = name.split_whitespace().collect::<Vec<_>>().join("_");
	format!("{stem}_portfolio.{}", format.extension())
}

/// `Content-Disposition` value for an attachment called `filename`.
///
/// Names that are not plain ASCII get an ASCII fallback plus an RFC 5987
/// `filename*` parameter carrying the UTF-8 name.
///
/// # Examples
///
/// ```
/// use folio_profiles::export::content_disposition;
///
/// assert_eq!(
///     content_disposition("Ada_portfolio.json"),
///     r#"attachment; filename="Ada_portfolio.json""#
/// );
/// assert_eq!(
///     content_disposition("Zoë_portfolio.html"),
///     r#"attachment; filename="Zo__portfolio.html"; filename*=UTF-8''Zo%C3%AB_portfolio.html"#
/// );
/// ```
pub fn content_disposition(filename: &str) -> String {
	let fallback: String = filename
		.chars()
		.map(|c| match c {
			'"' | '\\' => '_',
			c if c.is_ascii() && !c.is_ascii_control() => c,
			_ => '_',
		})
		.collect();
	if fallback == filename {
		return format!("attachment; filename=\"{filename}\"");
	}
	format!(
		"attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
		utf8_percent_encode(filename, ATTR_CHAR)
	)
}
