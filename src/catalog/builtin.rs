//! The builtin rubric: short-form BLI 3.0 lesson criteria M1-M4.
//! Schools with their own rubric replace this via the config file.

use super::types::{ModuleSpec, RubricCatalog};

fn module_spec(title: &str, criteria: &[(&str, &str)]) -> ModuleSpec {
    ModuleSpec {
        title: title.to_string(),
        criteria: criteria
            .iter()
            .map(|(id, text)| (id.to_string(), text.to_string()))
            .collect(),
    }
}

impl Default for RubricCatalog {
    fn default() -> Self {
        let modules = [
            (
                "M1",
                module_spec(
                    "Schülerinnen und Schüler aktivieren",
                    &[
                        ("1.1", "Kompetenzziele sind für Lernende transparent."),
                        ("1.2", "Lehrkraft ist sprachbildend (Vorbildfunktion Deutsch)."),
                        ("1.3", "Aktive Beteiligung der Lernenden wird gefördert."),
                        ("1.4", "Unterricht unterstützt selbstständiges Lernen."),
                        ("1.5", "Reflexion der Lernprozesse wird angeleitet."),
                    ],
                ),
            ),
            (
                "M2",
                module_spec(
                    "Kompetenzen entwickeln",
                    &[
                        ("2.1", "Fachlicher Kompetenzzuwachs wird ermöglicht."),
                        ("2.2", "Medienkompetenz wird gefördert (zielgerichteter Medieneinsatz)."),
                        ("2.3", "Methodenkompetenz wird aufgebaut und angewandt."),
                        ("2.4", "Deutschkompetenz wird gezielt entwickelt."),
                        ("2.5", "Fachsprache im DFU wird funktional genutzt."),
                    ],
                ),
            ),
            (
                "M3",
                module_spec(
                    "Unterricht lernwirksam gestalten",
                    &[
                        ("3.1", "Stundenablauf ist transparent und klar strukturiert."),
                        ("3.2", "Medien/Arbeitsmittel werden zielgerichtet eingesetzt."),
                        ("3.3", "Lehrkraft moderiert und steuert Lernprozesse."),
                        ("3.4", "Heterogenität wird didaktisch berücksichtigt."),
                        ("3.5", "Personalisiertes/individualisiertes Lernen wird gefördert."),
                    ],
                ),
            ),
            (
                "M4",
                module_spec(
                    "Lernklima förderlich gestalten",
                    &[
                        ("4.1", "Sozial kompetentes, wertschätzendes Miteinander."),
                        ("4.2", "Kooperative Lernarrangements unterstützen Soziallernen."),
                        ("4.3", "Differenzierte, kriteriengeleitete Rückmeldungen."),
                        ("4.4", "Positive Fehlerkultur ist sichtbar."),
                        ("4.5", "Lernumgebung unterstützt Lernaktivitäten."),
                    ],
                ),
            ),
        ]
        .into_iter()
        .map(|(id, spec)| (id.to_string(), spec))
        .collect();

        RubricCatalog {
            report_title: "Hospitationsbogen – BLI 3.0".to_string(),
            modules,
            rating_labels: [
                "0 – nicht beobachtbar",
                "1 – Ansatzweise",
                "2 – Grundlegend",
                "3 – Gut umgesetzt",
                "4 – Sehr stark",
            ]
            .map(str::to_string)
            .to_vec(),
            suggested_comments: [
                "Bei der Hospitation war dieses Kriterium nicht erkennbar. Mögliche Ursache: Situations-/Phasenabhängigkeit.",
                "Ansatzpunkte sind erkennbar. Eine Fokussierung auf klare Routinen/Transparenz könnte die Wirksamkeit erhöhen.",
                "Grundlegend vorhanden. Durch Verbindlichkeit/Beispiele/Visualisierung weiter stärken.",
                "Überwiegend gut umgesetzt. Punktuell lässt sich die Wirkung noch durch Schüleraktivierung vertiefen.",
                "Sehr überzeugend umgesetzt; dient als Good-Practice-Beispiel.",
            ]
            .map(str::to_string)
            .to_vec(),
        }
    }
}
