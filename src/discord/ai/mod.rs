// Discord AI module
//
// Discord-specific delivery of relay responses (inline replies and
// temp-file attachments for oversized text).

pub mod responder;
