#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Phone,
    Mail,
    MapPin,
    Award,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IconText {
    pub icon: Icon,
    pub text: String,
}

impl IconText {
    pub fn new(icon: Icon, text: &str) -> Self {
        Self {
            icon,
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    pub title: String,
    pub hero_heading: String,
    pub hero_subtitle: String,
    pub cta_label: String,
    // `tel:` target opened by the call to action.
    pub cta_target: String,
    pub about_heading: String,
    pub about_paragraphs: Vec<String>,
    pub features: Vec<IconText>,
    pub contact_heading: String,
    pub contacts: Vec<IconText>,
    pub footer: String,
}

impl Default for PageContent {
    fn default() -> Self {
        Self {
            title: "ΚΑΤΑΛΥΤΙΚΑ".into(),
            hero_heading: "Εξυπηρετούμε. Ρυθμίζουμε.".into(),
            hero_subtitle: "Το εξειδικευμένο δικηγορικό γραφείο για τη ρύθμιση οφειλών.".into(),
            cta_label: "Ξεκινήστε τώρα".into(),
            cta_target: "tel:6982284087".into(),
            about_heading: "Σχετικά με εμάς".into(),
            about_paragraphs: vec![
                "Στην ΚΑΤΑΛΥΤΙΚΑ, η αποστολή μας είναι να παρέχουμε εξαιρετικές νομικές υπηρεσίες για την ρύθμιση οφειλών. Προσαρμόζουμε τις υπηρεσίες μας στις ατομικές ανάγκες κάθε πελάτη, διασφαλίζοντας έτσι την πιο αποτελεσματική ρύθμιση οφειλών.".into(),
                "Επιλέγοντας την ΚΑΤΑΛΥΤΙΚΑ, επιλέγετε απόλυτη γνώση, αξιοπιστία και αφοσίωση στο να αντιμετωπίσετε την οικονομική σας κατάσταση.".into(),
            ],
            features: vec![
                IconText::new(Icon::Award, "Επαγγελματισμός"),
                IconText::new(Icon::Mail, "Ενημέρωση νομοθεσίας"),
                IconText::new(Icon::MapPin, "Προστασία Πελατών"),
                IconText::new(Icon::Phone, "Επικοινωνία 24/7"),
            ],
            contact_heading: "Επικοινωνήστε μαζί μας".into(),
            contacts: vec![
                IconText::new(Icon::MapPin, "Γεροκωστοπούλου 22, Πάτρα"),
                IconText::new(Icon::Phone, "2610 223332"),
                IconText::new(Icon::Phone, "69 8228 4087"),
                IconText::new(Icon::Mail, "info@katalytika.gr"),
            ],
            footer: "© 2023 ΚΑΤΑΛΥΤΙΚΑ. Όλα τα δικαιώματα διατηρούνται.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_cards_use_distinct_icons() {
        let features = PageContent::default().features;
        for (i, a) in features.iter().enumerate() {
            for b in &features[i + 1..] {
                assert_ne!(a.icon, b.icon, "{} and {} share an icon", a.text, b.text);
            }
        }
    }

    #[test]
    fn cta_dials_mobile_number() {
        assert!(PageContent::default().cta_target.starts_with("tel:"));
    }
}
