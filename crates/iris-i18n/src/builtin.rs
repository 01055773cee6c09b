//! Built-in translation tables.
//!
//! `en-US` is the default table and the only one carrying the `delete`,
//! `save`, `confirmDelete` and `confirmAction` keys; other languages reach
//! them through fallback.

use crate::catalog::LanguageTable;

const EN_US: &[(&str, &str)] = &[
    ("loading", "Loading..."),
    ("close", "Close"),
    ("cancel", "Cancel"),
    ("ok", "OK"),
    ("yes", "Yes"),
    ("no", "No"),
    ("confirm", "Confirm"),
    ("prompt", "Enter Value"),
    ("delete", "Delete"),
    ("save", "Save"),
    ("error", "Error"),
    ("warning", "Warning"),
    ("success", "Success"),
    ("info", "Information"),
    ("loadError", "Error loading content: {0}"),
    ("confirmDelete", "Are you sure you want to delete this item?"),
    ("confirmAction", "Are you sure you want to proceed?"),
    ("maximize", "Maximize"),
    ("restore", "Restore"),
    ("minimize", "Minimize"),
    ("minimized", "Minimized dialogs"),
    ("untitled", "Untitled"),
];

const SR_RS: &[(&str, &str)] = &[
    ("ok", "U redu"),
    ("cancel", "Otkaži"),
    ("yes", "Da"),
    ("no", "Ne"),
    ("close", "Zatvori"),
    ("confirm", "Potvrda"),
    ("prompt", "Unos"),
    ("info", "Informacija"),
    ("success", "Uspeh"),
    ("warning", "Upozorenje"),
    ("error", "Greška"),
    ("loading", "Učitavanje..."),
    ("loadError", "Greška pri učitavanju sadržaja: {0}"),
    ("maximize", "Maksimiziraj"),
    ("restore", "Vrati"),
    ("minimize", "Minimizuj"),
    ("minimized", "Minimizovani dijalozi"),
    ("untitled", "Bez naslova"),
];

const DE_DE: &[(&str, &str)] = &[
    ("ok", "OK"),
    ("cancel", "Abbrechen"),
    ("yes", "Ja"),
    ("no", "Nein"),
    ("close", "Schließen"),
    ("confirm", "Bestätigen"),
    ("prompt", "Eingabe"),
    ("info", "Information"),
    ("success", "Erfolg"),
    ("warning", "Warnung"),
    ("error", "Fehler"),
    ("loading", "Laden..."),
    ("loadError", "Fehler beim Laden des Inhalts: {0}"),
    ("maximize", "Maximieren"),
    ("restore", "Wiederherstellen"),
    ("minimize", "Minimieren"),
    ("minimized", "Minimierte Dialoge"),
    ("untitled", "Ohne Titel"),
];

const FR_FR: &[(&str, &str)] = &[
    ("ok", "OK"),
    ("cancel", "Annuler"),
    ("yes", "Oui"),
    ("no", "Non"),
    ("close", "Fermer"),
    ("confirm", "Confirmer"),
    ("prompt", "Saisie"),
    ("info", "Information"),
    ("success", "Succès"),
    ("warning", "Avertissement"),
    ("error", "Erreur"),
    ("loading", "Chargement..."),
    ("loadError", "Erreur lors du chargement du contenu: {0}"),
    ("maximize", "Agrandir"),
    ("restore", "Restaurer"),
    ("minimize", "Réduire"),
    ("minimized", "Fenêtres réduites"),
    ("untitled", "Sans titre"),
];

const ES_ES: &[(&str, &str)] = &[
    ("ok", "Aceptar"),
    ("cancel", "Cancelar"),
    ("yes", "Sí"),
    ("no", "No"),
    ("close", "Cerrar"),
    ("confirm", "Confirmar"),
    ("prompt", "Entrada"),
    ("info", "Información"),
    ("success", "Éxito"),
    ("warning", "Advertencia"),
    ("error", "Error"),
    ("loading", "Cargando..."),
    ("loadError", "Error al cargar el contenido: {0}"),
    ("maximize", "Maximizar"),
    ("restore", "Restaurar"),
    ("minimize", "Minimizar"),
    ("minimized", "Diálogos minimizados"),
    ("untitled", "Sin título"),
];

const SOURCES: &[(&str, &str, &[(&str, &str)])] = &[
    ("en-US", "English", EN_US),
    ("sr-RS", "Srpski", SR_RS),
    ("de-DE", "Deutsch", DE_DE),
    ("fr-FR", "Français", FR_FR),
    ("es-ES", "Español", ES_ES),
];

/// Every built-in table, default language first.
#[must_use]
pub fn tables() -> Vec<LanguageTable> {
    SOURCES
        .iter()
        .filter_map(|&(code, name, pairs)| {
            LanguageTable::from_pairs(code, name, pairs.iter().copied()).ok()
        })
        .collect()
}
