// Blablador services
// Services provide the shell's behaviour: pending voice commands, the voice intent,
// desktop actions and settings.

pub mod command_center;
pub mod desktop_actions;
pub mod settings_engine;
pub mod voice_intent;
