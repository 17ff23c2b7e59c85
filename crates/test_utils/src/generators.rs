//! Test Data Generators
//!
//! Proptest strategies for closed-set values and request fields, plus
//! `fake`-backed helpers for realistic one-off records.

use fake::faker::address::en::{CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use proptest::prelude::*;
use proptest::sample::select;

use core_kernel::{CustomerId, LeadId};
use domain_crm::{
    CallDirection, ContactChannel, CustomerStatus, LeadStatus, NewCustomer, NewLead,
    Sentiment, TicketPriority, TicketStatus,
};

/// Strategy for every lead status
pub fn lead_status_strategy() -> impl Strategy<Value = LeadStatus> {
    select(LeadStatus::ALL)
}

/// Strategy for every contact channel
pub fn contact_channel_strategy() -> impl Strategy<Value = ContactChannel> {
    select(ContactChannel::ALL)
}

pub fn customer_status_strategy() -> impl Strategy<Value = CustomerStatus> {
    select(CustomerStatus::ALL)
}

pub fn ticket_priority_strategy() -> impl Strategy<Value = TicketPriority> {
    select(TicketPriority::ALL)
}

pub fn ticket_status_strategy() -> impl Strategy<Value = TicketStatus> {
    select(TicketStatus::ALL)
}

pub fn call_direction_strategy() -> impl Strategy<Value = CallDirection> {
    select(CallDirection::ALL)
}

pub fn sentiment_strategy() -> impl Strategy<Value = Sentiment> {
    select(Sentiment::ALL)
}

/// Strategy for lowercase words that are not a status of any entity
pub fn unknown_status_strategy() -> impl Strategy<Value = String> {
    "[a-z]{3,12}".prop_filter("must not be a known status", |s| {
        s.parse::<LeadStatus>().is_err()
            && s.parse::<CustomerStatus>().is_err()
            && s.parse::<TicketStatus>().is_err()
    })
}

/// Strategy for generating valid email addresses
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{5,10}", "[a-z]{3,8}")
        .prop_map(|(local, domain)| format!("{}@{}.com", local, domain))
}

/// Strategy for generating valid phone numbers
pub fn phone_strategy() -> impl Strategy<Value = String> {
    (100u32..999u32, 100u32..999u32, 1000u32..9999u32)
        .prop_map(|(area, prefix, line)| format!("+1-{}-{}-{}", area, prefix, line))
}

/// Strategy for generating names
pub fn name_strategy() -> impl Strategy<Value = String> {
    ("[A-Z][a-z]{2,10}", "[A-Z][a-z]{2,10}")
        .prop_map(|(first, last)| format!("{} {}", first, last))
}

/// Strategy for a name padded with whitespace, paired with the bare name
pub fn padded_name_strategy() -> impl Strategy<Value = (String, String)> {
    (name_strategy(), " {0,3}", " {0,3}")
        .prop_map(|(name, left, right)| (format!("{left}{name}{right}"), name))
}

/// Strategy for blank text: empty or whitespace only
pub fn blank_strategy() -> impl Strategy<Value = String> {
    "[ \t]{0,5}"
}

/// Strategy for valid lead intake requests with any optional fields
pub fn new_lead_strategy() -> impl Strategy<Value = NewLead> {
    (
        name_strategy(),
        email_strategy(),
        proptest::option::of(phone_strategy()),
        proptest::option::of(contact_channel_strategy()),
        proptest::option::of(lead_status_strategy()),
    )
        .prop_map(|(name, email, phone, preferred_contact, status)| NewLead {
            phone,
            preferred_contact,
            status,
            ..NewLead::new(name, email)
        })
}

/// Strategy for random identifiers
pub fn lead_id_strategy() -> impl Strategy<Value = LeadId> {
    any::<[u8; 16]>().prop_map(|bytes| LeadId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

pub fn customer_id_strategy() -> impl Strategy<Value = CustomerId> {
    any::<[u8; 16]>().prop_map(|bytes| CustomerId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// A lead with realistic, randomly generated contact details
pub fn fake_lead() -> NewLead {
    NewLead {
        phone: Some(PhoneNumber().fake()),
        message: Some(Sentence(3..8).fake()),
        ..NewLead::new(Name().fake::<String>(), SafeEmail().fake::<String>())
    }
}

/// A customer with realistic, randomly generated contact and address details
pub fn fake_customer() -> NewCustomer {
    NewCustomer {
        phone: Some(PhoneNumber().fake()),
        company: Some(CompanyName().fake()),
        address: Some(StreetName().fake()),
        city: Some(CityName().fake()),
        state: Some(StateAbbr().fake()),
        zip: Some(ZipCode().fake()),
        ..NewCustomer::new(Name().fake::<String>(), SafeEmail().fake::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_leads_pass_validation(lead in new_lead_strategy()) {
            prop_assert!(lead.prepare().is_ok());
        }

        #[test]
        fn unknown_status_never_parses(value in unknown_status_strategy()) {
            prop_assert!(value.parse::<LeadStatus>().is_err());
        }

        #[test]
        fn padded_names_are_accepted_and_kept((padded, bare) in padded_name_strategy()) {
            prop_assert_eq!(padded.trim(), bare.as_str());
            let insert = NewLead::new(padded.clone(), "dana@example.com").prepare().unwrap();
            prop_assert_eq!(insert.name, padded);
        }
    }

    #[test]
    fn test_fake_records_pass_validation() {
        for _ in 0..10 {
            assert!(fake_lead().prepare().is_ok());
            assert!(fake_customer().prepare().is_ok());
        }
    }
}
