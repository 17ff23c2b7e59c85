//! Repository behaviour against the in-memory store
//!
//! These exercise the same repository code the server runs, with
//! `MemoryStore` standing in for the hosted store.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use core_kernel::{CustomerId, LeadId};
use domain_crm::{
    CallDirection, ChatMessage, CustomerStatus, CustomerUpdate, LeadStatus, LeadUpdate,
    MessageSender, NewAdminUser, NewCallLog, NewCustomer, NewLead, NewServiceTicket,
    SaveConversation, ServiceTicketUpdate, TicketPriority, TicketStatus,
};
use infra_store::repositories::{
    AdminUserRepository, CallLogRepository, ConversationRepository, CustomerRepository,
    LeadRepository, ServiceTicketRepository, CUSTOMERS_TABLE, LEADS_TABLE,
};
use infra_store::{MemoryStore, StoreError, TableStore};

fn memory() -> (Arc<MemoryStore>, Arc<dyn TableStore>) {
    let store = Arc::new(MemoryStore::new());
    let dyn_store: Arc<dyn TableStore> = store.clone();
    (store, dyn_store)
}

// ============================================================================
// Leads
// ============================================================================

mod lead_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_id_timestamp_and_defaults() {
        let (_, store) = memory();
        let leads = LeadRepository::from_store(store);

        let lead = leads
            .create(NewLead::new("Dana Reyes", "dana@example.com"))
            .await
            .unwrap();

        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.source.as_deref(), Some("website"));
        assert!(lead.updated_at.is_none());

        let fetched = leads.get_by_id(lead.id).await.unwrap();
        assert_eq!(fetched, lead);
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_store() {
        let (memory, store) = memory();
        let leads = LeadRepository::from_store(store);

        let err = leads.create(NewLead::new("", "nope")).await.unwrap_err();

        assert!(matches!(err, StoreError::Invalid(_)));
        assert_eq!(memory.count(LEADS_TABLE).await, 0);
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_filters_by_status() {
        let (_, store) = memory();
        let leads = LeadRepository::from_store(store);

        let first = leads.create(NewLead::new("First", "first@example.com")).await.unwrap();
        let second = leads.create(NewLead::new("Second", "second@example.com")).await.unwrap();
        let third = leads.create(NewLead::new("Third", "third@example.com")).await.unwrap();
        leads.update_status(second.id, LeadStatus::Won).await.unwrap();

        let all: Vec<LeadId> = leads.list(None).await.unwrap().iter().map(|l| l.id).collect();
        assert_eq!(all, vec![third.id, second.id, first.id]);

        let won = leads.list(Some(LeadStatus::Won)).await.unwrap();
        assert_eq!(won.len(), 1);
        assert_eq!(won[0].id, second.id);

        assert!(leads.list(Some(LeadStatus::Lost)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_status_update_stamps_updated_at_and_keeps_other_fields() {
        let (_, store) = memory();
        let leads = LeadRepository::from_store(store);
        let lead = leads
            .create(NewLead {
                phone: Some("555-0100".to_string()),
                ..NewLead::new("Dana", "dana@example.com")
            })
            .await
            .unwrap();

        let updated = leads.update_status(lead.id, LeadStatus::Contacted).await.unwrap();

        assert_eq!(updated.status, LeadStatus::Contacted);
        assert_eq!(updated.phone.as_deref(), Some("555-0100"));
        assert_eq!(updated.created_at, lead.created_at);
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_missing_lead_is_not_found() {
        let (_, store) = memory();
        let leads = LeadRepository::from_store(store);

        assert!(leads.get_by_id(LeadId::new()).await.unwrap_err().is_not_found());
        assert!(leads
            .update(LeadId::new(), LeadUpdate::status(LeadStatus::Lost))
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_text_round_trips_as_supplied() {
        let (_, store) = memory();
        let leads = LeadRepository::from_store(store);

        let lead = leads
            .create(NewLead {
                phone: Some(" 555 ".to_string()),
                message: Some(String::new()),
                source: Some("  chat  ".to_string()),
                ..NewLead::new(" Dana ", " dana@example.com ")
            })
            .await
            .unwrap();

        let fetched = leads.get_by_id(lead.id).await.unwrap();
        assert_eq!(fetched, lead);
        assert_eq!(fetched.name, " Dana ");
        assert_eq!(fetched.email, " dana@example.com ");
        assert_eq!(fetched.phone.as_deref(), Some(" 555 "));
        assert_eq!(fetched.message.as_deref(), Some(""));
        assert_eq!(fetched.source.as_deref(), Some("  chat  "));
    }

    #[tokio::test]
    async fn test_blank_name_update_rejected_before_store() {
        let (memory, store) = memory();
        let leads = LeadRepository::from_store(store);
        let lead = leads.create(NewLead::new("Dana", "dana@example.com")).await.unwrap();

        let err = leads
            .update(
                lead.id,
                LeadUpdate {
                    name: Some("   ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Invalid(_)));
        let rows = memory.rows(LEADS_TABLE).await;
        assert_eq!(rows[0]["name"], "Dana");
        assert!(rows[0]["updated_at"].is_null());
    }

    #[tokio::test]
    async fn test_name_and_email_update_applied() {
        let (_, store) = memory();
        let leads = LeadRepository::from_store(store);
        let lead = leads.create(NewLead::new("Dana", "dana@example.com")).await.unwrap();

        let updated = leads
            .update(
                lead.id,
                LeadUpdate {
                    name: Some("Dana Reyes".to_string()),
                    email: Some("dana.reyes@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Dana Reyes");
        assert_eq!(updated.email, "dana.reyes@example.com");
        assert_eq!(updated.status, lead.status);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_every_created_lead_is_listed_once(count in 1usize..8) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async {
                let (_, store) = memory();
                let leads = LeadRepository::from_store(store);
                for i in 0..count {
                    leads
                        .create(NewLead::new(format!("Lead {i}"), format!("lead{i}@example.com")))
                        .await
                        .unwrap();
                }

                let listed = leads.list(None).await.unwrap();
                assert_eq!(listed.len(), count);
                assert!(listed.windows(2).all(|w| w[0].created_at >= w[1].created_at));
            });
        }
    }
}

// ============================================================================
// Customers and tickets
// ============================================================================

mod customer_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_sorted_by_name_then_creation() {
        let (_, store) = memory();
        let customers = CustomerRepository::from_store(store);

        let zed = customers.create(NewCustomer::new("Zed Storage", "z@example.com")).await.unwrap();
        let acme_one = customers.create(NewCustomer::new("Acme", "a1@example.com")).await.unwrap();
        let acme_two = customers.create(NewCustomer::new("Acme", "a2@example.com")).await.unwrap();

        let listed = customers.list(None).await.unwrap();
        let ids: Vec<CustomerId> = listed.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![acme_one.id, acme_two.id, zed.id]);
    }

    #[tokio::test]
    async fn test_status_default_and_filter() {
        let (_, store) = memory();
        let customers = CustomerRepository::from_store(store);

        let active = customers
            .create(NewCustomer::new("Active Co", "a@example.com"))
            .await
            .unwrap();
        customers
            .create(NewCustomer {
                status: Some(CustomerStatus::Prospect),
                ..NewCustomer::new("Maybe Co", "m@example.com")
            })
            .await
            .unwrap();

        assert_eq!(active.status, CustomerStatus::Active);
        let prospects = customers.list(Some(CustomerStatus::Prospect)).await.unwrap();
        assert_eq!(prospects.len(), 1);
        assert_eq!(prospects[0].name, "Maybe Co");
    }

    #[tokio::test]
    async fn test_padded_and_empty_text_round_trips() {
        let (_, store) = memory();
        let customers = CustomerRepository::from_store(store);

        let customer = customers
            .create(NewCustomer {
                phone: Some("   ".to_string()),
                city: Some(String::new()),
                notes: Some("  gate code 4411  ".to_string()),
                ..NewCustomer::new("  Harbor Marina ", "office@harbor.test")
            })
            .await
            .unwrap();

        let fetched = customers.get_by_id(customer.id).await.unwrap();
        assert_eq!(fetched, customer);
        assert_eq!(fetched.name, "  Harbor Marina ");
        assert_eq!(fetched.phone.as_deref(), Some("   "));
        assert_eq!(fetched.city.as_deref(), Some(""));
        assert_eq!(fetched.notes.as_deref(), Some("  gate code 4411  "));
    }

    #[tokio::test]
    async fn test_blank_name_update_rejected_before_store() {
        let (memory, store) = memory();
        let customers = CustomerRepository::from_store(store);
        let customer = customers.create(NewCustomer::new("Acme", "a@example.com")).await.unwrap();

        let err = customers
            .update(
                customer.id,
                CustomerUpdate {
                    name: Some("  ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Invalid(_)));
        assert_eq!(memory.rows(CUSTOMERS_TABLE).await[0]["name"], "Acme");
    }
}

mod ticket_tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_embed_customer_summary() {
        let (_, store) = memory();
        let customers = CustomerRepository::from_store(store.clone());
        let tickets = ServiceTicketRepository::from_store(store);

        let customer = customers
            .create(NewCustomer {
                phone: Some("555-0199".to_string()),
                ..NewCustomer::new("Harbor Marina", "office@harbor.test")
            })
            .await
            .unwrap();
        let created = tickets
            .create(NewServiceTicket::new(customer.id, "Gate camera offline"))
            .await
            .unwrap();

        assert_eq!(created.priority, TicketPriority::Normal);
        assert_eq!(created.status, TicketStatus::Open);

        let fetched = tickets.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched.customer, Some(customer.summary()));

        let listed = tickets.list(None).await.unwrap();
        assert_eq!(listed[0].customer.as_ref().map(|c| c.name.as_str()), Some("Harbor Marina"));
    }

    #[tokio::test]
    async fn test_update_and_status_filter() {
        let (_, store) = memory();
        let tickets = ServiceTicketRepository::from_store(store);
        let customer_id = CustomerId::new();

        let ticket = tickets
            .create(NewServiceTicket::new(customer_id, "Replace keypad"))
            .await
            .unwrap();
        tickets
            .create(NewServiceTicket::new(customer_id, "Annual inspection"))
            .await
            .unwrap();

        let scheduled_for = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
        let updated = tickets
            .update(
                ticket.id,
                ServiceTicketUpdate {
                    status: Some(TicketStatus::Scheduled),
                    assigned_to: Some("Tech A".to_string()),
                    scheduled_date: Some(scheduled_for),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.scheduled_date, Some(scheduled_for));
        assert_eq!(updated.title, "Replace keypad");

        let scheduled = tickets.list(Some(TicketStatus::Scheduled)).await.unwrap();
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].assigned_to.as_deref(), Some("Tech A"));
        // customer row does not exist, so nothing is embedded
        assert!(scheduled[0].customer.is_none());
    }
}

// ============================================================================
// Conversations, call logs, admin users
// ============================================================================

mod conversation_tests {
    use super::*;

    #[tokio::test]
    async fn test_save_replaces_messages_for_same_session() {
        let (_, store) = memory();
        let conversations = ConversationRepository::from_store(store);
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();

        let first = conversations
            .save(SaveConversation::new(
                "session-1",
                vec![ChatMessage::new(MessageSender::User, "Hi", at)],
            ))
            .await
            .unwrap();
        let second = conversations
            .save(SaveConversation::new(
                "session-1",
                vec![
                    ChatMessage::new(MessageSender::User, "Hi", at),
                    ChatMessage::new(MessageSender::Assistant, "Hello!", at),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.messages.len(), 2);

        let fetched = conversations.get_by_session("session-1").await.unwrap();
        assert_eq!(fetched.messages, second.messages);
    }

    #[tokio::test]
    async fn test_later_save_keeps_lead_link() {
        let (_, store) = memory();
        let conversations = ConversationRepository::from_store(store);
        let lead_id = LeadId::new();

        conversations
            .save(SaveConversation {
                lead_id: Some(lead_id),
                ..SaveConversation::new("session-2", vec![])
            })
            .await
            .unwrap();
        let resaved = conversations
            .save(SaveConversation::new("session-2", vec![]))
            .await
            .unwrap();

        assert_eq!(resaved.lead_id, Some(lead_id));
    }

    #[tokio::test]
    async fn test_padded_session_key_found_as_saved() {
        let (_, store) = memory();
        let conversations = ConversationRepository::from_store(store);

        let saved = conversations
            .save(SaveConversation::new(" s1 ", vec![]))
            .await
            .unwrap();
        assert_eq!(saved.session_id, " s1 ");

        let fetched = conversations.get_by_session(" s1 ").await.unwrap();
        assert_eq!(fetched.id, saved.id);
        assert!(conversations.get_by_session("s1").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let (_, store) = memory();
        let conversations = ConversationRepository::from_store(store);
        assert!(conversations.get_by_session("nope").await.unwrap_err().is_not_found());
    }
}

mod call_log_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_list_get() {
        let (_, store) = memory();
        let calls = CallLogRepository::from_store(store);

        let older = calls
            .create(NewCallLog {
                caller_name: Some("Pat".to_string()),
                call_type: Some(CallDirection::Inbound),
                duration_seconds: Some(95),
                ..Default::default()
            })
            .await
            .unwrap();
        let newer = calls.create(NewCallLog::default()).await.unwrap();

        let listed = calls.list().await.unwrap();
        assert_eq!(listed.iter().map(|c| c.id).collect::<Vec<_>>(), vec![newer.id, older.id]);
        assert_eq!(calls.get_by_id(older.id).await.unwrap().duration_seconds, Some(95));
    }
}

mod admin_tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_is_idempotent_by_email() {
        let (memory, store) = memory();
        let admins = AdminUserRepository::from_store(store);

        let first = admins
            .upsert_admin(NewAdminUser::admin("Owner@Example.com", "Owner", "hash-1"))
            .await
            .unwrap();
        let second = admins
            .upsert_admin(NewAdminUser::admin("owner@example.com", "Owner", "hash-2"))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(memory.count(infra_store::repositories::ADMIN_USERS_TABLE).await, 1);

        let found = admins.find_by_email("OWNER@example.com").await.unwrap().unwrap();
        assert_eq!(found.password_hash, "hash-2");
        assert!(found.is_active);
    }

    #[tokio::test]
    async fn test_unknown_admin_is_none() {
        let (_, store) = memory();
        let admins = AdminUserRepository::from_store(store);
        assert!(admins.find_by_email("ghost@example.com").await.unwrap().is_none());
    }
}
