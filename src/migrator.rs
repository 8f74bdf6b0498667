use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250203_000001_create_suppliers_table::Migration),
            Box::new(m20250203_000002_create_purchase_requests_table::Migration),
            Box::new(m20250203_000003_create_purchase_invoices_table::Migration),
            Box::new(m20250610_000004_create_contract_invoices_table::Migration),
        ]
    }
}

mod m20250203_000001_create_suppliers_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250203_000001_create_suppliers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Suppliers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Suppliers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Suppliers::Name).string().not_null())
                        .col(ColumnDef::new(Suppliers::ContactName).string().null())
                        .col(ColumnDef::new(Suppliers::ContactEmail).string().null())
                        .col(ColumnDef::new(Suppliers::ContactPhone).string().null())
                        .col(
                            ColumnDef::new(Suppliers::Puan)
                                .double()
                                .not_null()
                                .default(0.0),
                        )
                        .col(
                            ColumnDef::new(Suppliers::PuanSayisi)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Suppliers::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Suppliers::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_suppliers_name")
                        .table(Suppliers::Table)
                        .col(Suppliers::Name)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Suppliers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Suppliers {
        Table,
        Id,
        Name,
        ContactName,
        ContactEmail,
        ContactPhone,
        Puan,
        PuanSayisi,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250203_000002_create_purchase_requests_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250203_000002_create_purchase_requests_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PurchaseRequests::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseRequests::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseRequests::RequesterId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseRequests::Unit).string().not_null())
                        .col(
                            ColumnDef::new(PurchaseRequests::ItemName)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseRequests::ItemSpec).text().null())
                        .col(
                            ColumnDef::new(PurchaseRequests::Justification)
                                .text()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseRequests::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseRequests::CategoryId).uuid().null())
                        .col(
                            ColumnDef::new(PurchaseRequests::Stage)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseRequests::StageLabel)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseRequests::Approved)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(PurchaseRequests::Rejected)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(PurchaseRequests::RejectionReason)
                                .text()
                                .null(),
                        )
                        .col(ColumnDef::new(PurchaseRequests::Offers).json().not_null())
                        .col(
                            ColumnDef::new(PurchaseRequests::SelectedOffer)
                                .json()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseRequests::Version)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(
                            ColumnDef::new(PurchaseRequests::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseRequests::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchase_requests_stage")
                        .table(PurchaseRequests::Table)
                        .col(PurchaseRequests::Stage)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchase_requests_requester")
                        .table(PurchaseRequests::Table)
                        .col(PurchaseRequests::RequesterId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PurchaseRequests::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum PurchaseRequests {
        Table,
        Id,
        RequesterId,
        Unit,
        ItemName,
        ItemSpec,
        Justification,
        Quantity,
        CategoryId,
        Stage,
        StageLabel,
        Approved,
        Rejected,
        RejectionReason,
        Offers,
        SelectedOffer,
        Version,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250203_000003_create_purchase_invoices_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250203_000003_create_purchase_invoices_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PurchaseInvoices::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseInvoices::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseInvoices::PurchaseRequestId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseInvoices::FileUrl)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseInvoices::Amount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PurchaseInvoices::Approved)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(PurchaseInvoices::RejectionReason)
                                .text()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseInvoices::SupplierRated)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(PurchaseInvoices::UploadedBy)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseInvoices::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchase_invoices_request")
                                .from(
                                    PurchaseInvoices::Table,
                                    PurchaseInvoices::PurchaseRequestId,
                                )
                                .to(PurchaseRequests::Table, PurchaseRequests::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchase_invoices_request")
                        .table(PurchaseInvoices::Table)
                        .col(PurchaseInvoices::PurchaseRequestId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PurchaseInvoices::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum PurchaseInvoices {
        Table,
        Id,
        PurchaseRequestId,
        FileUrl,
        Amount,
        Approved,
        RejectionReason,
        SupplierRated,
        UploadedBy,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum PurchaseRequests {
        Table,
        Id,
    }
}

mod m20250610_000004_create_contract_invoices_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250610_000004_create_contract_invoices_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ContractInvoices::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ContractInvoices::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ContractInvoices::ContractNo)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(ContractInvoices::Amount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ContractInvoices::Status)
                                .string()
                                .not_null()
                                .default("PENDING"),
                        )
                        .col(
                            ColumnDef::new(ContractInvoices::IssuedDate)
                                .timestamp()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ContractInvoices::PaymentReceivedDate)
                                .timestamp()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ContractInvoices::AcademicianPaidDate)
                                .timestamp()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ContractInvoices::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ContractInvoices::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_contract_invoices_status")
                        .table(ContractInvoices::Table)
                        .col(ContractInvoices::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ContractInvoices::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ContractInvoices {
        Table,
        Id,
        ContractNo,
        Amount,
        Status,
        IssuedDate,
        PaymentReceivedDate,
        AcademicianPaidDate,
        CreatedAt,
        UpdatedAt,
    }
}
