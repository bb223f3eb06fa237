//! User-facing French strings. There is no localization layer.

pub const FIELD_REQUIRED: &str = "Champs requis";

pub const FIRST_NAME_PLACEHOLDER: &str = "Prénom";
pub const LAST_NAME_PLACEHOLDER: &str = "Nom";
pub const FIRST_NAME_LABEL: &str = "Votre prénom : ";
pub const LAST_NAME_LABEL: &str = "Votre nom : ";

pub const REGISTER_BUTTON: &str = "S'inscrire";
pub const LOGIN_BUTTON: &str = "Se connecter";
pub const CLEAR_BUTTON: &str = "Nettoyer l'application";

pub const REGISTER_SUCCEEDED: &str = "Inscription réussie";
pub const REGISTER_FAILED: &str = "Echec de l'inscription, veuillez réessayer";
pub const LOGIN_FAILED: &str = "Echec de la connexion";
pub const BIOMETRIC_CANCELLED: &str = "Utilisation biométrique annulée";
pub const BIOMETRIC_FAILED: &str = "L'utilisation biométrique a échouée";
pub const CLEAR_SUCCEEDED: &str = "Toutes les données ont été supprimées";
pub const CLEAR_FAILED: &str = "Echec de la suppression des données";

pub const CLEAR_CONFIRM_TITLE: &str = "Suppression des données";
pub const CLEAR_CONFIRM_BODY: &str =
    "Cette action supprimera la totalité des données de l'application, souhaitez vous continuer ?";
pub const CANCEL: &str = "Annuler";
pub const CONFIRM: &str = "Confirmer";
pub const OK: &str = "OK";

pub const BIOMETRIC_PROMPT_MESSAGE: &str = "Utiliser mon empreinte";
pub const BIOMETRIC_CONFIRM: &str = "Empreinte reconnue";
