mod common;

use std::fs;

use anyhow::Result;
use common::{DEFAULT_PHONE, SECOND_PHONE, TestAccount, file_names, read_lines, test_service};
use uuid::Uuid;
use wallet::domain::PaymentStatus;
use wallet::io::{ExportSummary, Exporter, ImportSummary, Importer};
use wallet::{ErrorKind, LedgerError, LedgerService};

#[test]
fn test_export_writes_dump_lines() -> Result<()> {
    let (mut service, temp) = test_service()?;
    let (account, payments) = TestAccount::default_account().add_to(&mut service)?;
    let favorite = service.favorite_payment(payments[0].id, "Taxi")?;

    let summary = Exporter::new(&service).export_dump(temp.path())?;

    assert_eq!(
        summary,
        ExportSummary {
            accounts: 1,
            payments: 1,
            favorites: 1
        }
    );
    assert_eq!(
        read_lines(temp.path().join("accounts.dump"))?,
        vec![format!("{};{};{};", account.id, DEFAULT_PHONE, 9000_00)]
    );
    assert_eq!(
        read_lines(temp.path().join("payments.dump"))?,
        vec![format!("{};{};100000;auto;INPROGRESS;", payments[0].id, account.id)]
    );
    assert_eq!(
        read_lines(temp.path().join("favorites.dump"))?,
        vec![format!("{};{};Taxi;100000;auto;", favorite.id, account.id)]
    );

    Ok(())
}

#[test]
fn test_export_skips_empty_collections() -> Result<()> {
    let (mut service, temp) = test_service()?;
    service.register_account(DEFAULT_PHONE)?;

    let summary = Exporter::new(&service).export_dump(temp.path())?;

    assert_eq!(summary.payments, 0);
    assert_eq!(file_names(temp.path())?, vec!["accounts.dump"]);

    Ok(())
}

#[test]
fn test_export_empty_ledger_writes_nothing() -> Result<()> {
    let (service, temp) = test_service()?;
    Exporter::new(&service).export_dump(temp.path())?;
    assert!(file_names(temp.path())?.is_empty());
    Ok(())
}

#[test]
fn test_roundtrip_into_fresh_ledger() -> Result<()> {
    let (mut service, temp) = test_service()?;
    TestAccount::default_account().add_to(&mut service)?;
    let (_, payments) = TestAccount {
        phone: SECOND_PHONE,
        balance: 5000_00,
        payments: vec![(100_00, "food"), (250_00, "mobile")],
    }
    .add_to(&mut service)?;
    service.reject(payments[0].id)?;
    service.favorite_payment(payments[1].id, "Phone bill")?;

    Exporter::new(&service).export_dump(temp.path())?;

    let mut restored = LedgerService::new();
    let summary = Importer::new(&mut restored).import_dump(temp.path())?;

    assert_eq!(
        summary,
        ImportSummary {
            accounts: 2,
            payments: 3,
            favorites: 1
        }
    );
    assert_eq!(restored.list_accounts(), service.list_accounts());
    assert_eq!(restored.list_payments(), service.list_payments());
    assert_eq!(restored.list_favorites(), service.list_favorites());
    assert_eq!(
        restored.find_payment_by_id(payments[0].id)?.status,
        PaymentStatus::Fail
    );

    // Sequential IDs continue after the restored accounts
    assert_eq!(restored.register_account("+10000")?.id, 3);

    Ok(())
}

#[test]
fn test_import_missing_directory_is_empty() -> Result<()> {
    let (_, temp) = test_service()?;
    let mut service = LedgerService::new();

    let summary = Importer::new(&mut service).import_dump(temp.path().join("absent"))?;

    assert_eq!(summary, ImportSummary::default());
    assert!(service.list_accounts().is_empty());
    Ok(())
}

#[test]
fn test_import_overwrites_known_records() -> Result<()> {
    let (mut service, temp) = test_service()?;
    let (account, payments) = TestAccount::default_account().add_to(&mut service)?;
    let payment_id = payments[0].id;

    fs::write(
        temp.path().join("accounts.dump"),
        format!("{};+7000;42;\n", account.id),
    )?;
    fs::write(
        temp.path().join("payments.dump"),
        format!("{};{};100000;auto;FAIL;\n", payment_id, account.id),
    )?;

    Importer::new(&mut service).import_dump(temp.path())?;

    let account = service.find_account_by_id(account.id)?;
    assert_eq!(account.phone.as_str(), "+7000");
    assert_eq!(account.balance, 42);
    assert_eq!(service.list_accounts().len(), 1);
    assert_eq!(
        service.find_payment_by_id(payment_id)?.status,
        PaymentStatus::Fail
    );
    assert_eq!(service.list_payments().len(), 1);

    Ok(())
}

#[test]
fn test_import_unknown_account_keeps_dumped_id() -> Result<()> {
    let (mut service, temp) = test_service()?;
    service.register_account(DEFAULT_PHONE)?;

    fs::write(temp.path().join("accounts.dump"), "7;+7000;300;\n")?;
    Importer::new(&mut service).import_dump(temp.path())?;

    let accounts = service.list_accounts();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[1].id, 7);
    assert_eq!(accounts[1].phone.as_str(), "+7000");
    assert_eq!(accounts[1].balance, 300);
    assert_eq!(service.register_account(SECOND_PHONE)?.id, 8);

    Ok(())
}

#[test]
fn test_import_phone_shared_with_other_id_keeps_both() -> Result<()> {
    let (mut service, temp) = test_service()?;
    service.register_account(DEFAULT_PHONE)?;

    fs::write(
        temp.path().join("accounts.dump"),
        format!("5;{};300;\n", DEFAULT_PHONE),
    )?;
    Importer::new(&mut service).import_dump(temp.path())?;

    assert_eq!(service.list_accounts().len(), 2);
    assert_eq!(service.find_account_by_id(5)?.balance, 300);

    // Registration still refuses the phone
    let err = service.register_account(DEFAULT_PHONE).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Duplicate);
    Ok(())
}

#[test]
fn test_import_parse_failure_aborts_file() -> Result<()> {
    let (mut service, temp) = test_service()?;

    fs::write(
        temp.path().join("accounts.dump"),
        "1;+1;100;\n2;+2;abc;\n",
    )?;

    let err = Importer::new(&mut service)
        .import_dump(temp.path())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
    match err {
        LedgerError::Parse { path, line, field, .. } => {
            assert!(path.ends_with("accounts.dump"));
            assert_eq!(line, 2);
            assert_eq!(field, "balance");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
    // Nothing from the broken file was applied
    assert!(service.list_accounts().is_empty());

    Ok(())
}

#[test]
fn test_import_bad_payment_keeps_accounts() -> Result<()> {
    let (mut service, temp) = test_service()?;

    fs::write(temp.path().join("accounts.dump"), "1;+1;100;\n")?;
    fs::write(
        temp.path().join("payments.dump"),
        format!("{};one;100;auto;INPROGRESS;\n", Uuid::new_v4()),
    )?;

    let err = Importer::new(&mut service)
        .import_dump(temp.path())
        .unwrap_err();

    assert!(matches!(err, LedgerError::Parse { field: "account_id", .. }));
    assert_eq!(service.list_accounts().len(), 1);
    assert!(service.list_payments().is_empty());

    Ok(())
}

#[test]
fn test_import_then_export_is_stable() -> Result<()> {
    let (_, temp) = test_service()?;
    let payment_id = Uuid::new_v4();
    let accounts = "1;+992880806776;900000;\n2;+992935444994;0;\n";
    let payments = format!("{};1;100000;auto;OK;\n", payment_id);
    fs::write(temp.path().join("accounts.dump"), accounts)?;
    fs::write(temp.path().join("payments.dump"), &payments)?;

    let mut service = LedgerService::new();
    Importer::new(&mut service).import_dump(temp.path())?;
    fs::remove_file(temp.path().join("accounts.dump"))?;
    fs::remove_file(temp.path().join("payments.dump"))?;
    Exporter::new(&service).export_dump(temp.path())?;

    assert_eq!(
        fs::read_to_string(temp.path().join("accounts.dump"))?,
        accounts
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("payments.dump"))?,
        payments
    );
    assert_eq!(
        service.find_payment_by_id(payment_id)?.status,
        PaymentStatus::Done
    );

    Ok(())
}

#[test]
fn test_export_into_file_path_fails() -> Result<()> {
    let (mut service, temp) = test_service()?;
    TestAccount::default_account().add_to(&mut service)?;
    let not_a_dir = temp.path().join("data");
    fs::write(&not_a_dir, "")?;

    let err = Exporter::new(&service).export_dump(&not_a_dir).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Io);
    Ok(())
}

#[test]
fn test_failed_export_keeps_written_files() -> Result<()> {
    let (mut service, temp) = test_service()?;
    let (account, _) = TestAccount::default_account().add_to(&mut service)?;
    // A directory where payments.dump should go makes that write fail
    fs::create_dir(temp.path().join("payments.dump"))?;

    let err = Exporter::new(&service).export_dump(temp.path()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(
        read_lines(temp.path().join("accounts.dump"))?,
        vec![format!("{};{};{};", account.id, DEFAULT_PHONE, 9000_00)]
    );
    assert!(!temp.path().join("favorites.dump").exists());
    Ok(())
}
