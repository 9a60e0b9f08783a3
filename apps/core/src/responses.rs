//! Canned responses, one fixed string per intent.

use crate::brain::Intent;

/// Maps an intent to its fixed reply. Every intent resolves to an entry;
/// `Unknown` doubles as the catch-all. No failure mode.
pub fn respond(intent: Intent) -> &'static str {
    match intent {
        Intent::Greeting => "Hello! How can I help you today?",
        Intent::HelpRequest => {
            "Sure - tell me what you need help with and I will point you in the right direction."
        }
        Intent::InvoiceQuery => {
            "You can find your invoices under Billing > Invoices. Share an invoice number if you need details."
        }
        Intent::ProductQuery => {
            "Which product are you interested in? I can check availability and pricing for you."
        }
        Intent::Thanks => "You are very welcome!",
        Intent::Goodbye => "Goodbye! Have a great day.",
        Intent::Unknown => "Sorry, I did not quite get that. Could you rephrase?",
    }
}
