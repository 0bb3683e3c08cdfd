//! Form editing state types.
//!
//! Buffers and field markers for the event create form and the address
//! form. The state methods in `state_impl.rs` route typed characters here.

use crate::places::AddressFields;
use crate::store::Attachment;
use tui_textarea::TextArea;

/// Specifying the active field of the event create form.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EventFormField {
    Title,
    Description,
    Attachments,
}

impl EventFormField {
    pub fn next(&self) -> EventFormField {
        match self {
            EventFormField::Title => EventFormField::Description,
            EventFormField::Description => EventFormField::Attachments,
            EventFormField::Attachments => EventFormField::Title,
        }
    }

    pub fn previous(&self) -> EventFormField {
        match self {
            EventFormField::Title => EventFormField::Attachments,
            EventFormField::Description => EventFormField::Title,
            EventFormField::Attachments => EventFormField::Description,
        }
    }
}

/// Buffers for the event create form.
///
pub struct EventForm {
    pub field: EventFormField,
    pub title: String,
    pub description: TextArea<'static>,
    pub attachments: Vec<Attachment>,
    pub attachment_input: String,
}

impl Default for EventForm {
    fn default() -> Self {
        EventForm {
            field: EventFormField::Title,
            title: String::new(),
            description: TextArea::default(),
            attachments: vec![],
            attachment_input: String::new(),
        }
    }
}

impl EventForm {
    pub fn description_text(&self) -> String {
        self.description.lines().join("\n")
    }

    pub fn clear(&mut self) {
        *self = EventForm::default();
    }
}

/// Specifying the active field of the manual address form.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AddressField {
    Street,
    Number,
    District,
    City,
    PostalCode,
    Notes,
}

impl AddressField {
    pub const ALL: [AddressField; 6] = [
        AddressField::Street,
        AddressField::Number,
        AddressField::District,
        AddressField::City,
        AddressField::PostalCode,
        AddressField::Notes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AddressField::Street => "Street",
            AddressField::Number => "Number",
            AddressField::District => "District",
            AddressField::City => "City",
            AddressField::PostalCode => "Postal code",
            AddressField::Notes => "Notes",
        }
    }

    pub fn next(&self) -> AddressField {
        match self {
            AddressField::Street => AddressField::Number,
            AddressField::Number => AddressField::District,
            AddressField::District => AddressField::City,
            AddressField::City => AddressField::PostalCode,
            AddressField::PostalCode => AddressField::Notes,
            AddressField::Notes => AddressField::Street,
        }
    }

    pub fn previous(&self) -> AddressField {
        match self {
            AddressField::Street => AddressField::Notes,
            AddressField::Number => AddressField::Street,
            AddressField::District => AddressField::Number,
            AddressField::City => AddressField::District,
            AddressField::PostalCode => AddressField::City,
            AddressField::Notes => AddressField::PostalCode,
        }
    }
}

/// Buffers for the manual address form.
///
#[derive(Default)]
pub struct AddressForm {
    pub field: AddressField,
    pub street: String,
    pub number: String,
    pub district: String,
    pub city: String,
    pub postal_code: String,
    pub notes: String,
}

impl Default for AddressField {
    fn default() -> Self {
        AddressField::Street
    }
}

impl AddressForm {
    /// Overwrite the location fields from resolved place details, keeping
    /// any notes the user already typed.
    ///
    pub fn apply(&mut self, fields: &AddressFields) {
        self.street = fields.street.clone();
        self.number = fields.number.clone();
        self.district = fields.district.clone();
        self.city = fields.city.clone();
        self.postal_code = fields.postal_code.clone();
        self.field = AddressField::Street;
    }

    /// Mutable access to the buffer behind the active field.
    ///
    pub fn active_buffer(&mut self) -> &mut String {
        match self.field {
            AddressField::Street => &mut self.street,
            AddressField::Number => &mut self.number,
            AddressField::District => &mut self.district,
            AddressField::City => &mut self.city,
            AddressField::PostalCode => &mut self.postal_code,
            AddressField::Notes => &mut self.notes,
        }
    }

    pub fn buffer(&self, field: AddressField) -> &str {
        match field {
            AddressField::Street => &self.street,
            AddressField::Number => &self.number,
            AddressField::District => &self.district,
            AddressField::City => &self.city,
            AddressField::PostalCode => &self.postal_code,
            AddressField::Notes => &self.notes,
        }
    }

    /// Street, number, and city are required before save.
    ///
    pub fn missing_required(&self) -> Vec<AddressField> {
        let mut missing = vec![];
        if self.street.trim().is_empty() {
            missing.push(AddressField::Street);
        }
        if self.number.trim().is_empty() {
            missing.push(AddressField::Number);
        }
        if self.city.trim().is_empty() {
            missing.push(AddressField::City);
        }
        missing
    }
}
