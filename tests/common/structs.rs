use paymentcodes::Network;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TestData {
    pub network: Network,
    pub alice: Party,
    pub bob: Party,
    pub payments: Vec<PaymentData>,
    pub notification: NotificationData,
}

#[derive(Debug, Deserialize)]
pub struct Party {
    pub mnemonic: String,
    pub seed_hex: String,
    pub payment_code: String,
    pub notification_address: String,
}

/// Alice pays Bob. `address` is derived on both sides, `private_key` on Bob's only.
#[derive(Debug, Deserialize)]
pub struct PaymentData {
    pub index: u32,
    pub address: String,
    pub private_key: String,
}

#[derive(Debug, Deserialize)]
pub struct NotificationData {
    pub designated_wif: String,
    pub outpoint: String,
    pub blinded_payload: String,
    pub raw_transaction: String,
}
