mod command_handler;
mod display_event_handler;
mod mouse_combo_handler;
mod window_handler;
