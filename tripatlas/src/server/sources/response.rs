/// Payload returned by a static source: raw file bytes plus their MIME type.
pub struct SourceResponse {
	pub bytes: Vec<u8>,
	pub mime: String,
}

impl SourceResponse {
	pub fn new_some(bytes: Vec<u8>, mime: &str) -> Option<SourceResponse> {
		Some(SourceResponse {
			bytes,
			mime: mime.to_owned(),
		})
	}
}
