use crate::model::Role;
use serde_json::Value;

/// Everything the session controller may do to the screen.
///
/// Payload arguments are the raw reply values; each view decodes them and
/// degrades on its own when they have the wrong shape.
pub trait ConsultationView {
    fn append_message(&mut self, role: Role, message: &str, is_loading: bool);

    /// Removes the last transcript entry only when it is a loading
    /// placeholder.
    fn remove_last_message(&mut self);

    fn display_diagnosis_info(&mut self, info: Option<&Value>);

    fn display_prescription(&mut self, prescription: Option<&Value>);

    fn display_interaction_log(&mut self, events: Option<&Value>);

    fn set_input_enabled(&mut self, enabled: bool);

    fn set_placeholder(&mut self, text: &str);
}

impl<V: ConsultationView + ?Sized> ConsultationView for &mut V {
    fn append_message(&mut self, role: Role, message: &str, is_loading: bool) {
        (**self).append_message(role, message, is_loading);
    }

    fn remove_last_message(&mut self) {
        (**self).remove_last_message();
    }

    fn display_diagnosis_info(&mut self, info: Option<&Value>) {
        (**self).display_diagnosis_info(info);
    }

    fn display_prescription(&mut self, prescription: Option<&Value>) {
        (**self).display_prescription(prescription);
    }

    fn display_interaction_log(&mut self, events: Option<&Value>) {
        (**self).display_interaction_log(events);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        (**self).set_input_enabled(enabled);
    }

    fn set_placeholder(&mut self, text: &str) {
        (**self).set_placeholder(text);
    }
}

/// Fans every call out to both views, left first.
impl<A: ConsultationView, B: ConsultationView> ConsultationView for (A, B) {
    fn append_message(&mut self, role: Role, message: &str, is_loading: bool) {
        self.0.append_message(role, message, is_loading);
        self.1.append_message(role, message, is_loading);
    }

    fn remove_last_message(&mut self) {
        self.0.remove_last_message();
        self.1.remove_last_message();
    }

    fn display_diagnosis_info(&mut self, info: Option<&Value>) {
        self.0.display_diagnosis_info(info);
        self.1.display_diagnosis_info(info);
    }

    fn display_prescription(&mut self, prescription: Option<&Value>) {
        self.0.display_prescription(prescription);
        self.1.display_prescription(prescription);
    }

    fn display_interaction_log(&mut self, events: Option<&Value>) {
        self.0.display_interaction_log(events);
        self.1.display_interaction_log(events);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.0.set_input_enabled(enabled);
        self.1.set_input_enabled(enabled);
    }

    fn set_placeholder(&mut self, text: &str) {
        self.0.set_placeholder(text);
        self.1.set_placeholder(text);
    }
}
