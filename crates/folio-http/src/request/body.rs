use super::Request;
use folio_core::exception::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const INVALID_BODY: &str = "Invalid request body";

impl Request {
	/// Whether the body was sent as an HTML form
	pub fn is_form(&self) -> bool {
		self.header("content-type")
			.map(|ct| {
				ct.split(';')
					.next()
					.unwrap_or_default()
					.trim()
					.eq_ignore_ascii_case("application/x-www-form-urlencoded")
			})
			.unwrap_or(false)
	}

	/// Deserialize a JSON body.
	///
	/// # Errors
	///
	/// Returns [`Error::Validation`] with "Invalid request body" when the
	/// body is not valid JSON for `T`.
	pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
		serde_json::from_slice(&self.body).map_err(|_| Error::Validation(INVALID_BODY.into()))
	}

	/// Body as an untyped JSON value, accepting JSON or form encoding.
	///
	/// Form fields arrive as strings. An empty body is an empty object.
	///
	/// # Examples
	///
	/// ```
	/// use folio_http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::builder()
	///     .method(Method::POST)
	///     .header("content-type", "application/x-www-form-urlencoded")
	///     .body("name=Ada+Lovelace&skills=Math%2C+Poetry")
	///     .build()
	///     .unwrap();
	///
	/// let value = request.body_value().unwrap();
	/// assert_eq!(value["name"], "Ada Lovelace");
	/// assert_eq!(value["skills"], "Math, Poetry");
	/// ```
	pub fn body_value(&self) -> Result<Value> {
		if self.body.iter().all(u8::is_ascii_whitespace) {
			return Ok(Value::Object(Map::new()));
		}
		if self.is_form() {
			let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(&self.body)
				.map_err(|_| Error::Validation(INVALID_BODY.into()))?;
			let map = pairs
				.into_iter()
				.map(|(key, value)| (key, Value::String(value)))
				.collect::<Map<_, _>>();
			return Ok(Value::Object(map));
		}
		self.json()
	}
}
