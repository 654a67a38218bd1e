use crate::models::Item;
use chrono::NaiveDate;

/// Plain-text waste transfer draft shown with a match notification
pub fn transfer_draft(item: &Item, buyer_company: &str, country: &str, date: NaiveDate) -> String {
    format!(
        "WASTE TRANSFER DRAFT (DEMO)\n\
         -----------------------------------------------\n\
         DATE: {}\n\
         RESIDUE: {}\n\
         ORIGIN: {}\n\
         DESTINATION: {}\n\
         JURISDICTION: {}\n\
         \n\
         This document is a simulation generated for interface demonstration purposes only.",
        date.format("%d/%m/%Y"),
        item.name,
        item.generator,
        buyer_company,
        country
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_contains_parties() {
        let item = Item {
            id: "w-1".to_string(),
            name: "Sodium hydroxide residue".to_string(),
            generator: "Química Levante".to_string(),
            purity: 95.0,
            price: "60 EUR/t".to_string(),
            location_tag: "Valencia, ES".to_string(),
            base_score: 88.0,
            enriched_score: None,
            description: String::new(),
        };
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        let draft = transfer_draft(&item, "EcoWater Solutions", "ES", date);

        assert!(draft.contains("DATE: 09/03/2024"));
        assert!(draft.contains("RESIDUE: Sodium hydroxide residue"));
        assert!(draft.contains("ORIGIN: Química Levante"));
        assert!(draft.contains("DESTINATION: EcoWater Solutions"));
        assert!(draft.contains("JURISDICTION: ES"));
    }
}
