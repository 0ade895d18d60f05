// src/catalog.rs
use crate::flag::{FlagDefinition, FlagValue, ValueType};

struct CatalogEntry {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    default_value: bool,
}

const fn entry(
    key: &'static str,
    name: &'static str,
    description: &'static str,
    default_value: bool,
) -> CatalogEntry {
    CatalogEntry {
        key,
        name,
        description,
        default_value,
    }
}

const DEFAULT_FLAGS: &[CatalogEntry] = &[
    // authentication
    entry(
        "phone_auth_enabled",
        "Phone Authentication",
        "Enable phone number-based authentication",
        true,
    ),
    entry("email_auth_enabled", "Email Authentication", "Enable email-based authentication", true),
    entry(
        "otp_verification_enabled",
        "OTP Verification",
        "Enable OTP verification for authentication",
        true,
    ),
    entry(
        "biometric_auth_enabled",
        "Biometric Authentication",
        "Enable biometric authentication (fingerprint, face ID)",
        true,
    ),
    entry("mpin_auth_enabled", "MPIN Authentication", "Enable MPIN-based authentication", true),
    entry("agent_code_login_enabled", "Agent Code Login", "Enable agent code-based login", true),
    // core
    entry("dashboard_enabled", "Dashboard", "Enable dashboard functionality", true),
    entry("policies_enabled", "Policies", "Enable policy management features", true),
    entry(
        "payments_enabled",
        "Payments",
        "Enable payment processing (regulatory compliance required)",
        false,
    ),
    entry("chat_enabled", "Chat", "Enable chat functionality", true),
    entry("notifications_enabled", "Notifications", "Enable push notifications", true),
    // presentations
    entry(
        "presentation_carousel_enabled",
        "Presentation Carousel",
        "Enable presentation carousel feature",
        true,
    ),
    entry("presentation_editor_enabled", "Presentation Editor", "Enable presentation editor", true),
    entry(
        "presentation_templates_enabled",
        "Presentation Templates",
        "Enable presentation templates",
        true,
    ),
    entry(
        "presentation_offline_mode_enabled",
        "Presentation Offline Mode",
        "Enable offline mode for presentations",
        true,
    ),
    entry(
        "presentation_analytics_enabled",
        "Presentation Analytics",
        "Enable analytics for presentations",
        true,
    ),
    entry(
        "presentation_branding_enabled",
        "Presentation Branding",
        "Enable branding customization for presentations",
        true,
    ),
    // communication
    entry(
        "whatsapp_integration_enabled",
        "WhatsApp Integration",
        "Enable WhatsApp integration",
        true,
    ),
    entry("chatbot_enabled", "Chatbot", "Enable chatbot functionality", true),
    entry(
        "callback_management_enabled",
        "Callback Management",
        "Enable callback management features",
        true,
    ),
    // analytics
    entry("analytics_enabled", "Analytics", "Enable analytics features", true),
    entry("roi_dashboards_enabled", "ROI Dashboards", "Enable ROI dashboard features", true),
    entry("smart_dashboards_enabled", "Smart Dashboards", "Enable smart dashboard features", true),
    // portal
    entry("portal_enabled", "Portal", "Enable portal features", true),
    entry("data_import_enabled", "Data Import", "Enable data import functionality", true),
    entry(
        "excel_template_config_enabled",
        "Excel Template Configuration",
        "Enable Excel template configuration",
        true,
    ),
    // environment specific
    entry("debug_mode", "Debug Mode", "Enable debug mode (development only)", true),
    entry("enable_logging", "Enable Logging", "Enable application logging", true),
    entry(
        "development_tools_enabled",
        "Development Tools",
        "Enable development tools (development only)",
        true,
    ),
];

/// The built-in flag catalog, in provisioning order.
pub fn default_flags() -> Vec<FlagDefinition> {
    DEFAULT_FLAGS
        .iter()
        .map(|e| {
            FlagDefinition::new(e.key, e.name, ValueType::Boolean)
                .with_description(e.description)
                .with_default_value(FlagValue::Boolean(e.default_value))
        })
        .collect()
}
