//! Embedded schema migrations, driven by `db::run_migrations`.

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_party_tables::Migration),
            Box::new(m20240101_000002_create_catalog_tables::Migration),
            Box::new(m20240101_000003_create_sales_tables::Migration),
            Box::new(m20240101_000004_create_procurement_tables::Migration),
            Box::new(m20240101_000005_create_release_tables::Migration),
        ]
    }
}

mod m20240101_000001_create_party_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_party_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Customers::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Customers::Name).string().not_null())
                        .col(ColumnDef::new(Customers::ContactInfo).string().not_null())
                        .col(
                            ColumnDef::new(Customers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Employees::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Employees::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Employees::Name).string().not_null())
                        .col(ColumnDef::new(Employees::Role).string().not_null())
                        .col(
                            ColumnDef::new(Employees::Email)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Employees::PasswordHash).string().not_null())
                        .col(
                            ColumnDef::new(Employees::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Suppliers::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Suppliers::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Suppliers::Name).string().not_null())
                        .col(ColumnDef::new(Suppliers::ContactInfo).string().not_null())
                        .col(ColumnDef::new(Suppliers::Address).string().not_null())
                        .col(
                            ColumnDef::new(Suppliers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Suppliers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Employees::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await?;
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Customers {
        Table,
        Id,
        Name,
        ContactInfo,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Employees {
        Table,
        Id,
        Name,
        Role,
        Email,
        PasswordHash,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Suppliers {
        Table,
        Id,
        Name,
        ContactInfo,
        Address,
        CreatedAt,
    }
}

mod m20240101_000002_create_catalog_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_catalog_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(MenuItems::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(MenuItems::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(MenuItems::Name).string().not_null())
                        .col(ColumnDef::new(MenuItems::Price).decimal().not_null())
                        .col(ColumnDef::new(MenuItems::UnitMeasure).string().not_null())
                        .col(
                            ColumnDef::new(MenuItems::QuantityAvailable)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(MenuItems::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Ingredients::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Ingredients::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Ingredients::Name).string().not_null())
                        .col(
                            ColumnDef::new(Ingredients::CurrentStock)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Ingredients::ReorderPoint)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Ingredients::ExpiryDate).date().null())
                        .col(
                            ColumnDef::new(Ingredients::AutoOrderQty)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Ingredients::Unit).string().not_null())
                        .col(
                            ColumnDef::new(Ingredients::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Ingredients::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(MenuItems::Table).to_owned())
                .await?;
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum MenuItems {
        Table,
        Id,
        Name,
        Price,
        UnitMeasure,
        QuantityAvailable,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Ingredients {
        Table,
        Id,
        Name,
        CurrentStock,
        ReorderPoint,
        ExpiryDate,
        AutoOrderQty,
        Unit,
        CreatedAt,
    }
}

mod m20240101_000003_create_sales_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_sales_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SalesTransactions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesTransactions::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalesTransactions::CustomerId).uuid().null())
                        .col(
                            ColumnDef::new(SalesTransactions::EmployeeId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesTransactions::TransactionDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesTransactions::TotalAmount)
                                .decimal()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalesTransactions::Status).string().not_null())
                        .col(
                            ColumnDef::new(SalesTransactions::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_transactions_customer")
                                .from(SalesTransactions::Table, SalesTransactions::CustomerId)
                                .to(Customers::Table, Customers::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_transactions_employee")
                                .from(SalesTransactions::Table, SalesTransactions::EmployeeId)
                                .to(Employees::Table, Employees::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SalesLineItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesLineItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesLineItems::SalesTransactionId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalesLineItems::MenuItemId).uuid().not_null())
                        .col(ColumnDef::new(SalesLineItems::Quantity).integer().not_null())
                        .col(ColumnDef::new(SalesLineItems::UnitPrice).decimal().not_null())
                        .col(ColumnDef::new(SalesLineItems::Subtotal).decimal().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_line_items_transaction")
                                .from(SalesLineItems::Table, SalesLineItems::SalesTransactionId)
                                .to(SalesTransactions::Table, SalesTransactions::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_line_items_menu_item")
                                .from(SalesLineItems::Table, SalesLineItems::MenuItemId)
                                .to(MenuItems::Table, MenuItems::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_line_items_transaction")
                        .table(SalesLineItems::Table)
                        .col(SalesLineItems::SalesTransactionId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SalesLineItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(SalesTransactions::Table).to_owned())
                .await?;
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum SalesTransactions {
        Table,
        Id,
        CustomerId,
        EmployeeId,
        TransactionDate,
        TotalAmount,
        Status,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum SalesLineItems {
        Table,
        Id,
        SalesTransactionId,
        MenuItemId,
        Quantity,
        UnitPrice,
        Subtotal,
    }

    #[derive(DeriveIden)]
    enum Customers {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Employees {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum MenuItems {
        Table,
        Id,
    }
}

mod m20240101_000004_create_procurement_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_procurement_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseOrders::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseOrders::SupplierId).uuid().not_null())
                        .col(ColumnDef::new(PurchaseOrders::OrderDate).date().not_null())
                        .col(ColumnDef::new(PurchaseOrders::ExpectedDelivery).date().null())
                        .col(ColumnDef::new(PurchaseOrders::Status).string().not_null())
                        .col(
                            ColumnDef::new(PurchaseOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchase_orders_supplier")
                                .from(PurchaseOrders::Table, PurchaseOrders::SupplierId)
                                .to(Suppliers::Table, Suppliers::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrderLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseOrderLines::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderLines::PurchaseOrderId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderLines::IngredientId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderLines::QuantityOrdered)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderLines::UnitCost)
                                .decimal()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchase_order_lines_order")
                                .from(
                                    PurchaseOrderLines::Table,
                                    PurchaseOrderLines::PurchaseOrderId,
                                )
                                .to(PurchaseOrders::Table, PurchaseOrders::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchase_order_lines_ingredient")
                                .from(PurchaseOrderLines::Table, PurchaseOrderLines::IngredientId)
                                .to(Ingredients::Table, Ingredients::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(DeliveryReceipts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DeliveryReceipts::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DeliveryReceipts::PurchaseOrderId)
                                .uuid()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(DeliveryReceipts::DeliveryDate)
                                .date()
                                .not_null(),
                        )
                        .col(ColumnDef::new(DeliveryReceipts::ReceivedBy).uuid().null())
                        .col(ColumnDef::new(DeliveryReceipts::Status).string().not_null())
                        .col(
                            ColumnDef::new(DeliveryReceipts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_delivery_receipts_order")
                                .from(DeliveryReceipts::Table, DeliveryReceipts::PurchaseOrderId)
                                .to(PurchaseOrders::Table, PurchaseOrders::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_delivery_receipts_received_by")
                                .from(DeliveryReceipts::Table, DeliveryReceipts::ReceivedBy)
                                .to(Employees::Table, Employees::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(DeliveryLineItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DeliveryLineItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DeliveryLineItems::DeliveryReceiptId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DeliveryLineItems::IngredientId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DeliveryLineItems::QuantityReceived)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DeliveryLineItems::ActualCost)
                                .decimal()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_delivery_line_items_receipt")
                                .from(
                                    DeliveryLineItems::Table,
                                    DeliveryLineItems::DeliveryReceiptId,
                                )
                                .to(DeliveryReceipts::Table, DeliveryReceipts::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_delivery_line_items_ingredient")
                                .from(DeliveryLineItems::Table, DeliveryLineItems::IngredientId)
                                .to(Ingredients::Table, Ingredients::Id),
                        )
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(DeliveryLineItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(DeliveryReceipts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(PurchaseOrderLines::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(PurchaseOrders::Table).to_owned())
                .await?;
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum PurchaseOrders {
        Table,
        Id,
        SupplierId,
        OrderDate,
        ExpectedDelivery,
        Status,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum PurchaseOrderLines {
        Table,
        Id,
        PurchaseOrderId,
        IngredientId,
        QuantityOrdered,
        UnitCost,
    }

    #[derive(DeriveIden)]
    pub(super) enum DeliveryReceipts {
        Table,
        Id,
        PurchaseOrderId,
        DeliveryDate,
        ReceivedBy,
        Status,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum DeliveryLineItems {
        Table,
        Id,
        DeliveryReceiptId,
        IngredientId,
        QuantityReceived,
        ActualCost,
    }

    #[derive(DeriveIden)]
    enum Suppliers {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Employees {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Ingredients {
        Table,
        Id,
    }
}

mod m20240101_000005_create_release_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_release_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ReleaseRecords::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ReleaseRecords::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ReleaseRecords::EmployeeId).uuid().not_null())
                        .col(ColumnDef::new(ReleaseRecords::ReleaseDate).date().not_null())
                        .col(ColumnDef::new(ReleaseRecords::Purpose).string().null())
                        .col(
                            ColumnDef::new(ReleaseRecords::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_release_records_employee")
                                .from(ReleaseRecords::Table, ReleaseRecords::EmployeeId)
                                .to(Employees::Table, Employees::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ReleaseLineItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ReleaseLineItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ReleaseLineItems::ReleaseRecordId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ReleaseLineItems::IngredientId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ReleaseLineItems::QuantityReleased)
                                .decimal()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_release_line_items_record")
                                .from(ReleaseLineItems::Table, ReleaseLineItems::ReleaseRecordId)
                                .to(ReleaseRecords::Table, ReleaseRecords::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_release_line_items_ingredient")
                                .from(ReleaseLineItems::Table, ReleaseLineItems::IngredientId)
                                .to(Ingredients::Table, Ingredients::Id),
                        )
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ReleaseLineItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ReleaseRecords::Table).to_owned())
                .await?;
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum ReleaseRecords {
        Table,
        Id,
        EmployeeId,
        ReleaseDate,
        Purpose,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum ReleaseLineItems {
        Table,
        Id,
        ReleaseRecordId,
        IngredientId,
        QuantityReleased,
    }

    #[derive(DeriveIden)]
    enum Employees {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Ingredients {
        Table,
        Id,
    }
}
