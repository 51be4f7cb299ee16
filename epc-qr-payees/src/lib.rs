//! Saved payees.
//!
//! The host decides where payees live; this crate only fixes the record and
//! the operations a store must offer. [`MemoryPayeeStore`] keeps them in
//! memory, in the order they were first saved.

use epc_qr_payload::CreditTransferFields;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayeeError {
    #[error("name and IBAN are required to save a payee")]
    MissingNameOrIban,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Payee {
    pub name: String,
    pub iban: String,
    #[serde(default)]
    pub bic: String,
}

impl Payee {
    pub fn new(name: impl ToString, iban: impl ToString, bic: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            iban: iban.to_string(),
            bic: bic.to_string(),
        }
    }

    /// The payee part of `fields`, normalized for storage.
    pub fn from_fields(fields: &CreditTransferFields) -> Result<Self, PayeeError> {
        let payee = Self {
            name: fields.name.trim().to_string(),
            iban: fields.compact_iban().trim().to_string(),
            bic: fields.bic().to_uppercase().trim().to_string(),
        };
        if payee.name.is_empty() || payee.iban.is_empty() {
            return Err(PayeeError::MissingNameOrIban);
        }
        Ok(payee)
    }

    /// Copies name, IBAN and BIC into `fields`, leaving the rest alone.
    pub fn fill(&self, fields: &mut CreditTransferFields) {
        fields.name = self.name.clone();
        fields.iban = self.iban.clone();
        fields.bic = Some(self.bic.clone()).filter(|b| !b.is_empty());
    }
}

pub trait PayeeStore {
    type Error: std::error::Error;

    fn list_names(&self) -> Vec<String>;

    fn get(&self, name: &str) -> Option<Payee>;

    /// Replaces the payee with the same name, or adds it at the end.
    fn upsert(&mut self, payee: Payee) -> Result<(), Self::Error>;

    fn delete(&mut self, name: &str) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MemoryPayeeStore {
    #[serde(default)]
    payees: Vec<Payee>,
}

impl MemoryPayeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payees(&self) -> &[Payee] {
        &self.payees
    }
}

impl PayeeStore for MemoryPayeeStore {
    type Error = std::convert::Infallible;

    fn list_names(&self) -> Vec<String> {
        self.payees.iter().map(|p| p.name.clone()).collect()
    }

    fn get(&self, name: &str) -> Option<Payee> {
        self.payees.iter().find(|p| p.name == name).cloned()
    }

    fn upsert(&mut self, payee: Payee) -> Result<(), Self::Error> {
        match self.payees.iter_mut().find(|p| p.name == payee.name) {
            Some(existing) => {
                tracing::debug!(name = %payee.name, "updating payee");
                *existing = payee;
            }
            None => {
                tracing::debug!(name = %payee.name, "adding payee");
                self.payees.push(payee);
            }
        }
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<(), Self::Error> {
        let before = self.payees.len();
        self.payees.retain(|p| p.name != name);
        tracing::debug!(name, removed = before - self.payees.len(), "deleted payee");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_keeps_order_and_updates_in_place() {
        let mut store = MemoryPayeeStore::new();
        store.upsert(Payee::new("Alice", "DE89370400440532013000", "")).unwrap();
        store.upsert(Payee::new("Bob", "NL91ABNA0417164300", "ABNANL2A")).unwrap();
        store.upsert(Payee::new("Alice", "AT611904300234573201", "BKAUATWW")).unwrap();

        assert_eq!(store.list_names(), vec!["Alice", "Bob"]);
        assert_eq!(
            store.get("Alice"),
            Some(Payee::new("Alice", "AT611904300234573201", "BKAUATWW"))
        );
        assert_eq!(store.get("Carol"), None);
    }

    #[test]
    fn delete_removes_by_name() {
        let mut store = MemoryPayeeStore::new();
        store.upsert(Payee::new("Alice", "DE89370400440532013000", "")).unwrap();
        store.upsert(Payee::new("Bob", "NL91ABNA0417164300", "")).unwrap();
        store.delete("Alice").unwrap();
        store.delete("nobody").unwrap();
        assert_eq!(store.list_names(), vec!["Bob"]);
    }

    #[test]
    fn from_fields_normalizes() {
        let mut fields =
            CreditTransferFields::new("  Fabian Hiller ", " de89 3704 0044 0532 0130 00", "10");
        fields.bic = Some(" cobadeffxxx ".to_string());
        assert_eq!(
            Payee::from_fields(&fields),
            Ok(Payee::new("Fabian Hiller", "DE89370400440532013000", "COBADEFFXXX"))
        );
    }

    #[test]
    fn from_fields_needs_name_and_iban() {
        let fields = CreditTransferFields::new("  ", "DE89370400440532013000", "10");
        assert_eq!(Payee::from_fields(&fields), Err(PayeeError::MissingNameOrIban));
        let fields = CreditTransferFields::new("Fabian", "   ", "10");
        assert_eq!(Payee::from_fields(&fields), Err(PayeeError::MissingNameOrIban));
    }

    #[test]
    fn fill_loads_payee() {
        let mut fields = CreditTransferFields::new("old", "old", "7,50");
        fields.bic = Some("OLDBICXX".to_string());
        Payee::new("Bob", "NL91ABNA0417164300", "").fill(&mut fields);
        assert_eq!(fields.name, "Bob");
        assert_eq!(fields.iban, "NL91ABNA0417164300");
        assert_eq!(fields.bic, None);
        assert_eq!(fields.amount, "7,50");
    }

    #[test]
    fn json_shape() {
        let mut store = MemoryPayeeStore::new();
        store.upsert(Payee::new("Bob", "NL91ABNA0417164300", "ABNANL2A")).unwrap();
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(
            json,
            r#"{"payees":[{"name":"Bob","iban":"NL91ABNA0417164300","bic":"ABNANL2A"}]}"#
        );
        let back: MemoryPayeeStore =
            serde_json::from_str(r#"{"payees":[{"name":"A","iban":"B"}]}"#).unwrap();
        assert_eq!(back.payees(), &[Payee::new("A", "B", "")]);
    }
}
