use bigdecimal::BigDecimal;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_orders: u64,
    pub revenue: BigDecimal,
    pub products: u64,
    pub users: u64,
}
