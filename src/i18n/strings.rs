//! Localized strings used by the page shell and the block views.
//!
//! Content itself comes translated from the API; these cover only the
//! chrome around it. Unknown languages fall back to English.

/// All localized user-facing strings for a language
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    /// ISO 639-1 code
    pub code: &'static str,

    /// Language name in its own language (used by the language switcher)
    pub native_name: &'static str,

    // ==================== Pagination ====================
    pub previous_page: &'static str,
    pub next_page: &'static str,
    pub pagination_label: &'static str,

    // ==================== Listings ====================
    pub no_results: &'static str,
    pub results_unavailable: &'static str,
    pub search_label: &'static str,
    pub search_button: &'static str,

    // ==================== Page Shell ====================
    pub language_switcher_label: &'static str,
    pub navigation_label: &'static str,
    pub table_of_contents: &'static str,

    /// Shown in place of a block that has no renderer
    pub unknown_block: &'static str,

    pub not_found_title: &'static str,
    pub not_found_body: &'static str,
    pub error_title: &'static str,
    pub error_body: &'static str,
}

impl LanguageStrings {
    /// Strings for `code`, falling back to English.
    pub fn for_code(code: &str) -> &'static LanguageStrings {
        let primary = code.split(['-', '_']).next().unwrap_or(code);
        ALL.iter()
            .find(|strings| strings.code.eq_ignore_ascii_case(primary))
            .copied()
            .unwrap_or(&ENGLISH)
    }

    /// Native name for any code; codes without strings show the code itself.
    pub fn native_name_for(code: &str) -> String {
        let primary = code.split(['-', '_']).next().unwrap_or(code);
        ALL.iter()
            .find(|strings| strings.code.eq_ignore_ascii_case(primary))
            .map(|strings| strings.native_name.to_string())
            .unwrap_or_else(|| code.to_uppercase())
    }
}

static ALL: [&LanguageStrings; 6] = [&ENGLISH, &GERMAN, &FRENCH, &SPANISH, &ITALIAN, &DUTCH];

static ENGLISH: LanguageStrings = LanguageStrings {
    code: "en",
    native_name: "English",
    previous_page: "Previous",
    next_page: "Next",
    pagination_label: "Pagination",
    no_results: "No results found.",
    results_unavailable: "Results are currently unavailable.",
    search_label: "Search",
    search_button: "Search",
    language_switcher_label: "Language",
    navigation_label: "Main navigation",
    table_of_contents: "Table of contents",
    unknown_block: "Unknown block",
    not_found_title: "Page not found",
    not_found_body: "The page you were looking for does not exist.",
    error_title: "Something went wrong",
    error_body: "The page could not be loaded. Please try again later.",
};

static GERMAN: LanguageStrings = LanguageStrings {
    code: "de",
    native_name: "Deutsch",
    previous_page: "Zurück",
    next_page: "Weiter",
    pagination_label: "Seitennavigation",
    no_results: "Keine Ergebnisse gefunden.",
    results_unavailable: "Die Ergebnisse sind derzeit nicht verfügbar.",
    search_label: "Suche",
    search_button: "Suchen",
    language_switcher_label: "Sprache",
    navigation_label: "Hauptnavigation",
    table_of_contents: "Inhaltsverzeichnis",
    unknown_block: "Unbekannter Block",
    not_found_title: "Seite nicht gefunden",
    not_found_body: "Die gesuchte Seite existiert nicht.",
    error_title: "Ein Fehler ist aufgetreten",
    error_body: "Die Seite konnte nicht geladen werden. Bitte versuchen Sie es später erneut.",
};

static FRENCH: LanguageStrings = LanguageStrings {
    code: "fr",
    native_name: "Français",
    previous_page: "Précédent",
    next_page: "Suivant",
    pagination_label: "Pagination",
    no_results: "Aucun résultat.",
    results_unavailable: "Les résultats sont momentanément indisponibles.",
    search_label: "Recherche",
    search_button: "Rechercher",
    language_switcher_label: "Langue",
    navigation_label: "Navigation principale",
    table_of_contents: "Table des matières",
    unknown_block: "Bloc inconnu",
    not_found_title: "Page introuvable",
    not_found_body: "La page demandée n'existe pas.",
    error_title: "Une erreur est survenue",
    error_body: "La page n'a pas pu être chargée. Veuillez réessayer plus tard.",
};

static SPANISH: LanguageStrings = LanguageStrings {
    code: "es",
    native_name: "Español",
    previous_page: "Anterior",
    next_page: "Siguiente",
    pagination_label: "Paginación",
    no_results: "No se encontraron resultados.",
    results_unavailable: "Los resultados no están disponibles en este momento.",
    search_label: "Buscar",
    search_button: "Buscar",
    language_switcher_label: "Idioma",
    navigation_label: "Navegación principal",
    table_of_contents: "Índice",
    unknown_block: "Bloque desconocido",
    not_found_title: "Página no encontrada",
    not_found_body: "La página que busca no existe.",
    error_title: "Algo salió mal",
    error_body: "No se pudo cargar la página. Inténtelo de nuevo más tarde.",
};

static ITALIAN: LanguageStrings = LanguageStrings {
    code: "it",
    native_name: "Italiano",
    previous_page: "Precedente",
    next_page: "Successiva",
    pagination_label: "Paginazione",
    no_results: "Nessun risultato.",
    results_unavailable: "I risultati non sono al momento disponibili.",
    search_label: "Cerca",
    search_button: "Cerca",
    language_switcher_label: "Lingua",
    navigation_label: "Navigazione principale",
    table_of_contents: "Indice",
    unknown_block: "Blocco sconosciuto",
    not_found_title: "Pagina non trovata",
    not_found_body: "La pagina richiesta non esiste.",
    error_title: "Si è verificato un errore",
    error_body: "Impossibile caricare la pagina. Riprova più tardi.",
};

static DUTCH: LanguageStrings = LanguageStrings {
    code: "nl",
    native_name: "Nederlands",
    previous_page: "Vorige",
    next_page: "Volgende",
    pagination_label: "Paginering",
    no_results: "Geen resultaten gevonden.",
    results_unavailable: "De resultaten zijn momenteel niet beschikbaar.",
    search_label: "Zoeken",
    search_button: "Zoeken",
    language_switcher_label: "Taal",
    navigation_label: "Hoofdnavigatie",
    table_of_contents: "Inhoudsopgave",
    unknown_block: "Onbekend blok",
    not_found_title: "Pagina niet gevonden",
    not_found_body: "De gevraagde pagina bestaat niet.",
    error_title: "Er ging iets mis",
    error_body: "De pagina kon niet worden geladen. Probeer het later opnieuw.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_code_known_languages() {
        assert_eq!(LanguageStrings::for_code("de").next_page, "Weiter");
        assert_eq!(LanguageStrings::for_code("fr").code, "fr");
        assert_eq!(LanguageStrings::for_code("nl").native_name, "Nederlands");
    }

    #[test]
    fn test_for_code_regional_variant_uses_primary() {
        assert_eq!(LanguageStrings::for_code("de-AT").code, "de");
        assert_eq!(LanguageStrings::for_code("pt_BR").code, "en");
    }

    #[test]
    fn test_for_code_unknown_falls_back_to_english() {
        assert_eq!(LanguageStrings::for_code("ja").code, "en");
        assert_eq!(LanguageStrings::for_code("").code, "en");
    }

    #[test]
    fn test_native_name_for() {
        assert_eq!(LanguageStrings::native_name_for("es"), "Español");
        assert_eq!(LanguageStrings::native_name_for("ja"), "JA");
    }

    #[test]
    fn test_all_languages_have_non_empty_strings() {
        for strings in ALL {
            assert!(!strings.native_name.is_empty(), "{}", strings.code);
            assert!(!strings.unknown_block.is_empty(), "{}", strings.code);
            assert!(!strings.not_found_title.is_empty(), "{}", strings.code);
            assert!(!strings.previous_page.is_empty(), "{}", strings.code);
        }
    }
}
