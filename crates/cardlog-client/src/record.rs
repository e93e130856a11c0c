use chrono::NaiveDate;

/// Attribute count of a well-formed purchase row.
pub const MIN_FIELDS: usize = 6;
/// Attribute count once trailing installment metadata is present.
pub const INSTALLMENT_FIELDS: usize = 8;

pub const DATE_FORMAT: &str = "%d/%m/%Y";

pub(crate) const CARD: usize = 0;
pub(crate) const DATE: usize = 1;
pub(crate) const DESCRIPTION: usize = 2;
pub(crate) const AMOUNT: usize = 3;
pub(crate) const PAYER: usize = 4;
pub(crate) const STATUS: usize = 5;
pub(crate) const INSTALLMENT_CURRENT: usize = 6;
pub(crate) const INSTALLMENT_TOTAL: usize = 7;

/// One purchase entry as stored: an ordered attribute sequence.
///
/// Rows shorter than [`MIN_FIELDS`] are kept so a rewrite never drops them, but
/// every view and mutation skips them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub(crate) fn fields_mut(&mut self) -> &mut Vec<String> {
        &mut self.fields
    }

    pub fn is_well_formed(&self) -> bool {
        self.fields.len() >= MIN_FIELDS
    }

    pub fn card(&self) -> &str {
        self.field(CARD)
    }

    pub fn date(&self) -> &str {
        self.field(DATE)
    }

    pub fn description(&self) -> &str {
        self.field(DESCRIPTION)
    }

    pub fn amount(&self) -> &str {
        self.field(AMOUNT)
    }

    pub fn payer(&self) -> &str {
        self.field(PAYER)
    }

    pub fn status(&self) -> &str {
        self.field(STATUS)
    }

    pub(crate) fn set(&mut self, index: usize, value: String) {
        if let Some(slot) = self.fields.get_mut(index) {
            *slot = value;
        }
    }

    /// Parsed purchase date, `None` when the date attribute is not `dd/mm/yyyy`.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date().trim(), DATE_FORMAT).ok()
    }

    fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    AwaitingProof,
    InvoiceAttached,
    UnderReview,
    Improper,
    Approved,
    Disputed,
    Settled,
}

impl Status {
    pub const ALL: [Status; 7] = [
        Self::AwaitingProof,
        Self::InvoiceAttached,
        Self::UnderReview,
        Self::Improper,
        Self::Approved,
        Self::Disputed,
        Self::Settled,
    ];

    /// Label written to the purchase file.
    pub const fn label(self) -> &'static str {
        match self {
            Self::AwaitingProof => "Aguardando comprovação",
            Self::InvoiceAttached => "Nota fiscal anexada",
            Self::UnderReview => "Em Análise",
            Self::Improper => "Compra indevida – aguardando regularização",
            Self::Approved => "Compra Aprovada",
            Self::Disputed => "Em disputa / contestação no banco",
            Self::Settled => "Quitada",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::AwaitingProof => "awaiting-proof",
            Self::InvoiceAttached => "invoice-attached",
            Self::UnderReview => "under-review",
            Self::Improper => "improper",
            Self::Approved => "approved",
            Self::Disputed => "disputed",
            Self::Settled => "settled",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == label)
    }

    /// Accepts either the kebab-case key or the exact stored label.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        let key = trimmed.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.key() == key)
            .or_else(|| Self::from_label(trimmed))
    }
}
