use bytes::Bytes;

/// A file chosen through the picker or dropped on the drop zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    Over,
    Leave,
    Drop,
}

/// What the host should do with its native handling of a drag event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// Suppress native handling (e.g. the browser opening the dropped file).
    PreventDefault,
    Default,
}

pub fn disposition(event: DragEvent) -> EventDisposition {
    match event {
        DragEvent::Over | DragEvent::Drop => EventDisposition::PreventDefault,
        DragEvent::Leave => EventDisposition::Default,
    }
}

/// Current file selection plus the drop-zone affordance.
///
/// Picker and drop both replace the whole list; nothing is merged and no
/// type or size checks happen here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileInput {
    files: Vec<SelectedFile>,
    highlighted: bool,
}

impl FileInput {
    pub fn pick(&mut self, files: Vec<SelectedFile>) {
        self.files = files;
    }

    pub fn drag_over(&mut self) {
        self.highlighted = true;
    }

    pub fn drag_leave(&mut self) {
        self.highlighted = false;
    }

    pub fn drop_files(&mut self, files: Vec<SelectedFile>) {
        self.highlighted = false;
        self.files = files;
    }

    /// The file a submission would send: the first of the selection.
    pub fn current(&self) -> Option<&SelectedFile> {
        self.files.first()
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}
