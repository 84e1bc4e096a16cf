use crate::models::Objective;

/// Keyword table, checked in declaration order. The first objective with a
/// keyword contained in the lower-cased text wins.
pub const KEYWORDS: &[(Objective, &[&str])] = &[
    (
        Objective::Sell,
        &["comprar", "adquirir", "quiero comprar", "me interesa", "precio", "costo"],
    ),
    (
        Objective::Inquire,
        &["información", "detalles", "características", "especificaciones", "consultar"],
    ),
    (
        Objective::ScheduleAppointment,
        &["cita", "agendar", "programar", "reunión", "visita"],
    ),
];

pub fn detect_objective(text: &str) -> Option<Objective> {
    detect_with(KEYWORDS, text)
}

pub fn detect_with(table: &[(Objective, &[&str])], text: &str) -> Option<Objective> {
    let text = text.to_lowercase();
    table
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| text.contains(kw)))
        .map(|(objective, _)| *objective)
}
