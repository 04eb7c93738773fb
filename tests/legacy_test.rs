mod common;

use std::fs;

use anyhow::Result;
use common::{DEFAULT_PHONE, SECOND_PHONE, test_service};
use wallet::domain::PaymentStatus;
use wallet::io::{Exporter, Importer};
use wallet::{ErrorKind, LedgerService};

#[test]
fn test_export_legacy_format() -> Result<()> {
    let (mut service, temp) = test_service()?;
    let first = service.register_account(DEFAULT_PHONE)?;
    service.deposit(first.id, 500)?;
    service.register_account(SECOND_PHONE)?;
    let path = temp.path().join("accounts.txt");

    let count = Exporter::new(&service).export_legacy(&path)?;

    assert_eq!(count, 2);
    assert_eq!(
        fs::read_to_string(&path)?,
        "1;+992880806776;500|2;+992935444994;0|"
    );
    Ok(())
}

#[test]
fn test_import_legacy_file() -> Result<()> {
    let (_, temp) = test_service()?;
    let path = temp.path().join("accounts.txt");
    fs::write(&path, "1;+992880806776;500|2;+992935444994;0|")?;

    let mut service = LedgerService::new();
    let count = Importer::new(&mut service).import_legacy(&path)?;

    assert_eq!(count, 2);
    assert_eq!(service.find_account_by_id(1)?.balance, 500);
    assert_eq!(service.find_account_by_id(2)?.phone.as_str(), SECOND_PHONE);

    // New registrations do not reuse imported IDs
    assert_eq!(service.register_account("+10000")?.id, 3);
    Ok(())
}

#[test]
fn test_import_legacy_does_not_check_phones() -> Result<()> {
    let (_, temp) = test_service()?;
    let path = temp.path().join("accounts.txt");
    fs::write(&path, "1;+1;100|2;+1;200|")?;

    let mut service = LedgerService::new();
    Importer::new(&mut service).import_legacy(&path)?;

    assert_eq!(service.list_accounts().len(), 2);
    Ok(())
}

#[test]
fn test_import_legacy_missing_file() -> Result<()> {
    let (mut service, temp) = test_service()?;

    let err = Importer::new(&mut service)
        .import_legacy(temp.path().join("absent.txt"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Io);
    Ok(())
}

#[test]
fn test_import_legacy_bad_id() -> Result<()> {
    let (mut service, temp) = test_service()?;
    let path = temp.path().join("accounts.txt");
    fs::write(&path, "1;+1;100|x;+2;200|")?;

    let err = Importer::new(&mut service)
        .import_legacy(&path)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.to_string().contains(":2: invalid id"));
    assert!(service.list_accounts().is_empty());
    Ok(())
}

#[test]
fn test_legacy_ids_survive_dump_reload() -> Result<()> {
    let (_, temp) = test_service()?;
    let legacy = temp.path().join("accounts.txt");
    let dump_dir = temp.path().join("data");
    fs::write(&legacy, "5;+1;100000|")?;
    fs::create_dir(&dump_dir)?;

    let mut service = LedgerService::new();
    Importer::new(&mut service).import_legacy(&legacy)?;
    let payment = service.pay(5, 40000, "auto")?;
    Exporter::new(&service).export_dump(&dump_dir)?;

    let mut reloaded = LedgerService::new();
    Importer::new(&mut reloaded).import_dump(&dump_dir)?;

    assert_eq!(reloaded.find_account_by_id(5)?.balance, 60000);
    reloaded.reject(payment.id)?;
    assert_eq!(reloaded.find_account_by_id(5)?.balance, 100000);
    assert_eq!(
        reloaded.find_payment_by_id(payment.id)?.status,
        PaymentStatus::Fail
    );
    assert_eq!(reloaded.register_account("+2")?.id, 6);
    Ok(())
}

#[test]
fn test_legacy_duplicate_phones_reload_from_dump() -> Result<()> {
    let (_, temp) = test_service()?;
    let legacy = temp.path().join("accounts.txt");
    fs::write(&legacy, "1;+1;100|2;+1;200|")?;

    let mut service = LedgerService::new();
    Importer::new(&mut service).import_legacy(&legacy)?;
    Exporter::new(&service).export_dump(temp.path())?;

    let mut reloaded = LedgerService::new();
    Importer::new(&mut reloaded).import_dump(temp.path())?;

    assert_eq!(reloaded.list_accounts(), service.list_accounts());
    Ok(())
}
