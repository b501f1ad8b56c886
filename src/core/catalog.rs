//! Display names of the supported currency pairs and their provider symbols

/// Built-in pairs, quoted in Brazilian reais. The first entry is the default.
pub const DEFAULT_CURRENCIES: [(&str, &str); 5] = [
    ("Dólar Americano (USD/BRL)", "BRL=X"),
    ("Euro (EUR/BRL)", "EURBRL=X"),
    ("Libra Esterlina (GBP/BRL)", "GBPBRL=X"),
    ("Iene Japonês (JPY/BRL)", "JPYBRL=X"),
    ("Franco Suíço (CHF/BRL)", "CHFBRL=X"),
];

/// Ordered, immutable mapping from display name to provider symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyCatalog {
    entries: Vec<(String, String)>,
}

impl CurrencyCatalog {
    pub fn new<I, N, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<String>,
    {
        CurrencyCatalog {
            entries: entries
                .into_iter()
                .map(|(name, symbol)| (name.into(), symbol.into()))
                .collect(),
        }
    }

    pub fn symbol(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, symbol)| symbol.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbol(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, symbol)| (name.as_str(), symbol.as_str()))
    }

    /// The preselected currency of the dashboard.
    pub fn default_name(&self) -> Option<&str> {
        self.entries.first().map(|(name, _)| name.as_str())
    }
}

impl Default for CurrencyCatalog {
    fn default() -> Self {
        CurrencyCatalog::new(DEFAULT_CURRENCIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_order_and_symbols() {
        let catalog = CurrencyCatalog::default();

        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names.len(), 5);
        assert_eq!(catalog.default_name(), Some("Dólar Americano (USD/BRL)"));
        assert_eq!(names[1], "Euro (EUR/BRL)");
        assert_eq!(catalog.symbol("Dólar Americano (USD/BRL)"), Some("BRL=X"));
        assert_eq!(catalog.symbol("Euro (EUR/BRL)"), Some("EURBRL=X"));
        assert_eq!(catalog.symbol("Franco Suíço (CHF/BRL)"), Some("CHFBRL=X"));
    }

    #[test]
    fn test_unknown_name_has_no_symbol() {
        let catalog = CurrencyCatalog::default();
        assert_eq!(catalog.symbol("Bitcoin (BTC/BRL)"), None);
        assert!(!catalog.contains("euro (eur/brl)"));
    }

    #[test]
    fn test_empty_catalog_has_no_default() {
        let catalog = CurrencyCatalog::new(Vec::<(String, String)>::new());
        assert_eq!(catalog.default_name(), None);
    }
}
