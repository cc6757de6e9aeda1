//! Bilingual label table.
//!
//! Labels only change presentation; stored records are never translated.

use serde::{Deserialize, Serialize};

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Pl,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Self::Pl => "pl",
            Self::En => "en",
        }
    }

    /// Parses a locale-like value (`pl`, `pl_PL.UTF-8`, `EN-us`) by its
    /// two-letter prefix.
    pub fn from_code(value: &str) -> Option<Self> {
        let prefix: String = value.trim().chars().take(2).collect();
        match prefix.to_ascii_lowercase().as_str() {
            "pl" => Some(Self::Pl),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    /// The other language of the pair.
    pub fn toggled(self) -> Self {
        match self {
            Self::Pl => Self::En,
            Self::En => Self::Pl,
        }
    }

    pub fn label(self, label: Label) -> &'static str {
        match self {
            Self::Pl => polish(label),
            Self::En => english(label),
        }
    }
}

/// Picks the language from the first set locale variable, English otherwise.
pub fn detect_default_language() -> Language {
    let locale = ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty());
    language_for_locale(locale.as_deref())
}

pub fn language_for_locale(locale: Option<&str>) -> Language {
    locale.and_then(Language::from_code).unwrap_or(Language::En)
}

/// Keys of every user-visible string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    ListChildren,
    LangToggle,
    LangLabel,
    AddChild,
    FirstName,
    LastName,
    BirthYear,
    BirthMonth,
    BirthDay,
    Gender,
    Notes,
    DeleteChild,
    EditNotes,
    ConfirmDelete,
    DeleteSuccess,
    BirthDateLabel,
    GenderLabel,
    NotesLabel,
    NoNotes,
    NotAvailable,
    NoChildren,
    ChildrenHeader,
    ChildAdded,
    ChildNotFound,
    MissingName,
    ChooseOption,
    Choice,
    InvalidChoice,
    ChildIdPrompt,
    ShowChild,
    AddExamination,
    RecordAnswer,
    ExamTypePrompt,
    ConclusionsPrompt,
    ExaminationIdPrompt,
    QuestionIdPrompt,
    AnswerValuePrompt,
    Examinations,
    NoExaminations,
    NotesUpdated,
    InvalidNumber,
}

fn polish(label: Label) -> &'static str {
    match label {
        Label::ListChildren => "Lista dzieci",
        Label::LangToggle => "English",
        Label::LangLabel => "Język",
        Label::AddChild => "Dodaj dziecko",
        Label::FirstName => "Imię",
        Label::LastName => "Nazwisko",
        Label::BirthYear => "Rok urodzenia",
        Label::BirthMonth => "Miesiąc urodzenia",
        Label::BirthDay => "Dzień urodzenia",
        Label::Gender => "Płeć (M/K)",
        Label::Notes => "Notatki",
        Label::DeleteChild => "Usuń dziecko",
        Label::EditNotes => "Edytuj notatki",
        Label::ConfirmDelete => "Czy na pewno chcesz usunąć to dziecko?",
        Label::DeleteSuccess => "Dziecko zostało usunięte.",
        Label::BirthDateLabel => "Data ur.:",
        Label::GenderLabel => "Płeć:",
        Label::NotesLabel => "Notatki:",
        Label::NoNotes => "(brak notatek)",
        Label::NotAvailable => "brak",
        Label::NoChildren => "Brak dzieci w bazie.",
        Label::ChildrenHeader => "Lista dzieci w bazie:",
        Label::ChildAdded => "Dziecko zostało dodane do bazy.",
        Label::ChildNotFound => "Nie znaleziono dziecka o podanym ID.",
        Label::MissingName => "Brak imienia lub nazwiska.",
        Label::ChooseOption => "Wybierz opcję:",
        Label::Choice => "Wybór",
        Label::InvalidChoice => "Nieprawidłowy wybór!",
        Label::ChildIdPrompt => "Podaj ID dziecka",
        Label::ShowChild => "Pokaż szczegóły dziecka",
        Label::AddExamination => "Dodaj badanie",
        Label::RecordAnswer => "Zapisz odpowiedź",
        Label::ExamTypePrompt => "Rodzaj badania",
        Label::ConclusionsPrompt => "Wnioski",
        Label::ExaminationIdPrompt => "Podaj ID badania",
        Label::QuestionIdPrompt => "ID pytania",
        Label::AnswerValuePrompt => "Odpowiedź",
        Label::Examinations => "Badania:",
        Label::NoExaminations => "(brak badań)",
        Label::NotesUpdated => "Notatki zostały zaktualizowane.",
        Label::InvalidNumber => "Nieprawidłowa liczba.",
    }
}

fn english(label: Label) -> &'static str {
    match label {
        Label::ListChildren => "Children list",
        Label::LangToggle => "Polski",
        Label::LangLabel => "Language",
        Label::AddChild => "Add child",
        Label::FirstName => "First name",
        Label::LastName => "Last name",
        Label::BirthYear => "Birth year",
        Label::BirthMonth => "Birth month",
        Label::BirthDay => "Birth day",
        Label::Gender => "Gender (M/F)",
        Label::Notes => "Notes",
        Label::DeleteChild => "Delete child",
        Label::EditNotes => "Edit notes",
        Label::ConfirmDelete => "Are you sure you want to delete this child?",
        Label::DeleteSuccess => "Child has been deleted.",
        Label::BirthDateLabel => "Birth date:",
        Label::GenderLabel => "Gender:",
        Label::NotesLabel => "Notes:",
        Label::NoNotes => "(no notes)",
        Label::NotAvailable => "N/A",
        Label::NoChildren => "No children in the database.",
        Label::ChildrenHeader => "Children in the database:",
        Label::ChildAdded => "Child has been added.",
        Label::ChildNotFound => "No child with the given ID.",
        Label::MissingName => "First or last name is missing.",
        Label::ChooseOption => "Choose an option:",
        Label::Choice => "Choice",
        Label::InvalidChoice => "Invalid choice!",
        Label::ChildIdPrompt => "Child ID",
        Label::ShowChild => "Show child details",
        Label::AddExamination => "Add examination",
        Label::RecordAnswer => "Record answer",
        Label::ExamTypePrompt => "Examination type",
        Label::ConclusionsPrompt => "Conclusions",
        Label::ExaminationIdPrompt => "Examination ID",
        Label::QuestionIdPrompt => "Question ID",
        Label::AnswerValuePrompt => "Answer",
        Label::Examinations => "Examinations:",
        Label::NoExaminations => "(no examinations)",
        Label::NotesUpdated => "Notes have been updated.",
        Label::InvalidNumber => "Invalid number.",
    }
}

#[cfg(test)]
mod tests {
    use super::{language_for_locale, Label, Language};

    #[test]
    fn locale_prefix_selects_language() {
        assert_eq!(language_for_locale(Some("pl_PL.UTF-8")), Language::Pl);
        assert_eq!(language_for_locale(Some("EN_us")), Language::En);
        assert_eq!(language_for_locale(Some("de_DE")), Language::En);
        assert_eq!(language_for_locale(None), Language::En);
    }

    #[test]
    fn toggle_flips_between_the_two_sets() {
        assert_eq!(Language::Pl.toggled(), Language::En);
        assert_eq!(Language::En.toggled().toggled(), Language::En);
    }

    #[test]
    fn toggle_button_names_the_other_language() {
        assert_eq!(Language::Pl.label(Label::LangToggle), "English");
        assert_eq!(Language::En.label(Label::LangToggle), "Polski");
    }
}
