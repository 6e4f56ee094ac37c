// Entities of the ICC stack. Messages between them are routed by the MessageRouter.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Copy)]
pub enum IccEntity {
    /// Radio interface layer, owns the physical link to the card. External collaborator.
    Ril,
    /// Elementary File access
    IccIo,
    /// SIM Toolkit proactive command handling
    Stk,
    /// Cell Broadcast reassembly
    Cbs,
    /// Point-to-point SMS codec
    Sms,

    /// Any upper layer consumer (contacts, UI, SMS store). SAP determines routing
    User,
}
