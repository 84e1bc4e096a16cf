use crate::config::PromptProfile;

const CATALOG_SYSTEM_PROMPT: &str = r#"Eres un asistente de ventas en CommerIA. Tu tarea es:
1. Detectar las intenciones del usuario (vender, consultar, agendar cita)
2. Registrar los objetivos detectados
3. SOLO ofrecer productos que estén disponibles en nuestro catálogo
4. Guiar al usuario en el proceso de compra
5. SOLO ofrecer lo que pida el usuario; si pide algo que no está en el catálogo, indícale que no podemos ofrecerlo.
6. Si el usuario pide un teléfono, no ofrezcas cosas que no sean teléfonos.
IMPORTANTE:
- Solo debes ofrecer productos que aparezcan en la lista de productos disponibles.
- Si el usuario pregunta por productos que no están en la lista, indícale que solo puedes ofrecer los productos de nuestro catálogo.
- Cuando el usuario muestre interés en comprar o agendar una cita, indica que necesitas sus datos para continuar."#;

const CATALOG_FOLLOW_UP: &str =
    "Para continuar con tu solicitud, necesito que completes tus datos en el formulario que aparecerá.";

const BASIC_SYSTEM_PROMPT: &str = "Eres un asistente de ventas en CommerIA.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    System,
    Human,
    Ai,
}

impl Speaker {
    fn label(&self) -> &'static str {
        match self {
            Speaker::System => "System",
            Speaker::Human => "Human",
            Speaker::Ai => "AI",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: Speaker,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub turns: Vec<Turn>,
}

impl Prompt {
    /// System instruction, the user's message with catalog context, and a
    /// canned assistant turn asking for the contact form.
    pub fn sales(profile: PromptProfile, form_url: &str, message: &str, catalog: &str) -> Self {
        let (system, follow_up) = match profile {
            PromptProfile::Catalog => (CATALOG_SYSTEM_PROMPT.to_string(), CATALOG_FOLLOW_UP.to_string()),
            PromptProfile::Basic => (
                BASIC_SYSTEM_PROMPT.to_string(),
                format!(
                    "Para seguir, completa el formulario aquí: [Formulario]({form_url}). Una vez completado, vuelve al chat para continuar."
                ),
            ),
        };

        Self {
            turns: vec![
                Turn {
                    speaker: Speaker::System,
                    content: system,
                },
                Turn {
                    speaker: Speaker::Human,
                    content: format!("{message}\n\nProductos disponibles:\n{catalog}"),
                },
                Turn {
                    speaker: Speaker::Ai,
                    content: follow_up,
                },
            ],
        }
    }

    /// Flattens the turns into `Speaker: content` lines for a completion endpoint.
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(|t| format!("{}: {}", t.speaker.label(), t.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
