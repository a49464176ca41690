/// The status line shown over the grid.
///
/// `generation` increments on every replacement so renderers know when their
/// cached raster of the text is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: String,
    generation: u64,
}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            generation: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.generation += 1;
    }
}
