//! Minimal contract bindings used for operator approvals

use ethers::contract::abigen;

// Generate contract bindings for ERC20 (WAVAX)
abigen!(
    IERC20,
    r#"[
        function approve(address spender, uint256 amount) external returns (bool)
        function allowance(address owner, address spender) external view returns (uint256)
        function balanceOf(address account) external view returns (uint256)
    ]"#
);

// Generate contract bindings for ERC721 operator approval
abigen!(
    IERC721,
    r#"[
        function setApprovalForAll(address operator, bool approved) external
        function isApprovedForAll(address owner, address operator) external view returns (bool)
    ]"#
);
