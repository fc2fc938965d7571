//! Deterministic URI generation for external resources.

/// Hands out unique URIs for one resource family (buffers or images).
/// Counting starts at 1 so a two-buffer document named `scene` yields
/// `scene_1.bin` and `scene_2.bin`.
pub(crate) struct UriGenerator {
    basename: String,
    multiple: bool,
    counter: u32,
}

impl UriGenerator {
    pub(crate) fn new(basename: &str, multiple: bool) -> Self {
        Self {
            basename: basename.to_string(),
            multiple,
            counter: 1,
        }
    }

    /// A pre-set URI wins; otherwise the basename, numbered only when the
    /// family has more than one member.
    pub(crate) fn create(&mut self, preset: Option<&str>, extension: &str) -> String {
        if let Some(uri) = preset {
            return uri.to_string();
        }
        if !self.multiple {
            return format!("{}.{}", self.basename, extension);
        }
        let uri = format!("{}_{}.{}", self.basename, self.counter, extension);
        self.counter += 1;
        uri
    }
}
