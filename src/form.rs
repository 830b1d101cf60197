//! Form state for the create forms
//!
//! A form is a list of fields described by static `FieldSpec`s. Values are
//! kept as raw strings exactly as typed; coercion to JSON happens when a
//! resource builds its payload.

/// One option of a select field: the submitted value and its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Kind of form field, which decides what input it accepts and how it is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    /// Masked on screen
    Secret,
    Integer,
    Decimal,
    Select(&'static [SelectOption]),
}

/// Static description of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key used to look the value up when building a payload
    pub key: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            placeholder: "",
            kind,
        }
    }

    pub const fn with_placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

/// Individual form field with its pending value and cursor
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub spec: FieldSpec,
    pub value: String,
    /// Cursor position in characters, not bytes
    pub cursor_position: usize,
}

impl FormField {
    pub fn new(spec: FieldSpec) -> Self {
        Self {
            spec,
            value: String::new(),
            cursor_position: 0,
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Whether `c` may be typed into this field
    pub fn accepts(&self, c: char) -> bool {
        match self.spec.kind {
            FieldKind::Select(_) => false,
            FieldKind::Integer => c.is_ascii_digit() || c == '-',
            FieldKind::Decimal => c.is_ascii_digit() || c == '-' || c == '.',
            FieldKind::Text | FieldKind::TextArea | FieldKind::Secret => !c.is_control(),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if !self.accepts(c) {
            return;
        }
        let at = self.byte_index(self.cursor_position);
        self.value.insert(at, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.byte_index(self.cursor_position);
            self.value.remove(at);
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor_position < self.char_len() {
            let at = self.byte_index(self.cursor_position);
            self.value.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.char_len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.char_len();
    }

    /// Replace the value wholesale and park the cursor at the end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor_position = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_position = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Whether the field still needs input. A number field holding text that
    /// is not a finite number counts as unfilled, as a browser number input does.
    pub fn is_missing(&self) -> bool {
        match self.spec.kind {
            FieldKind::Integer | FieldKind::Decimal => !self
                .value
                .trim()
                .parse::<f64>()
                .map(f64::is_finite)
                .unwrap_or(false),
            _ => self.is_empty(),
        }
    }

    pub fn options(&self) -> &'static [SelectOption] {
        match self.spec.kind {
            FieldKind::Select(options) => options,
            _ => &[],
        }
    }

    fn selected_index(&self) -> Option<usize> {
        self.options().iter().position(|o| o.value == self.value)
    }

    /// Cycle a select field forward; past the last option it returns to unselected.
    pub fn select_next(&mut self) {
        let options = self.options();
        if options.is_empty() {
            return;
        }
        match self.selected_index() {
            None => self.set_value(options[0].value),
            Some(i) if i + 1 < options.len() => self.set_value(options[i + 1].value),
            Some(_) => self.clear(),
        }
    }

    /// Cycle a select field backward; before the first option it returns to unselected.
    pub fn select_previous(&mut self) {
        let options = self.options();
        if options.is_empty() {
            return;
        }
        match self.selected_index() {
            None => self.set_value(options[options.len() - 1].value),
            Some(0) => self.clear(),
            Some(i) => self.set_value(options[i - 1].value),
        }
    }

    /// Text shown for the current value: masked for secrets, the option label for selects.
    pub fn display_value(&self) -> String {
        match self.spec.kind {
            FieldKind::Secret => "•".repeat(self.char_len()),
            FieldKind::Select(options) => options
                .iter()
                .find(|o| o.value == self.value)
                .map(|o| o.label.to_string())
                .unwrap_or_else(|| self.value.clone()),
            _ => self.value.clone(),
        }
    }
}

/// Pending input values for one create form
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub fields: Vec<FormField>,
    pub current_field: usize,
}

impl FormState {
    pub fn new(specs: &[FieldSpec]) -> Self {
        Self {
            fields: specs.iter().copied().map(FormField::new).collect(),
            current_field: 0,
        }
    }

    /// Value of the field with the given key, empty if there is none
    pub fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.spec.key == key)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    /// Set a field by key. Returns false when the key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        match self.fields.iter_mut().find(|f| f.spec.key == key) {
            Some(field) => {
                field.set_value(value);
                true
            }
            None => false,
        }
    }

    /// First required field that is still empty or not a usable number
    pub fn first_missing(&self) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.is_missing()).map(|f| &f.spec)
    }

    pub fn is_complete(&self) -> bool {
        self.first_missing().is_none()
    }

    /// Return every field to its initial empty value
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.current_field = 0;
    }

    pub fn current(&self) -> Option<&FormField> {
        self.fields.get(self.current_field)
    }

    pub fn current_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.current_field)
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.current_field = (self.current_field + 1) % self.fields.len();
        }
    }

    pub fn previous_field(&mut self) {
        if !self.fields.is_empty() {
            self.current_field = if self.current_field == 0 {
                self.fields.len() - 1
            } else {
                self.current_field - 1
            };
        }
    }
}
