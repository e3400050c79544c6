use alloy::sol;

// ABI surface of the FluxTrade exchange contract and the mock ERC20
// tokens it trades, as emitted by the contract build.
sol! {
    #[sol(rpc)]
    interface IFluxTradeExchange {
        function swap(address tokenIn, address tokenOut, uint256 amountIn, uint256 minAmountOut) external payable returns (uint256);
        function addLiquidity(address token1, address token2, uint256 amount1, uint256 amount2) external;
        function getQuote(address tokenIn, address tokenOut, uint256 amountIn) external view returns (uint256);
        function tradingFee() external view returns (uint256);

        event Swap(address indexed user, address indexed tokenIn, address indexed tokenOut, uint256 amountIn, uint256 amountOut, uint256 fee);
        event LiquidityAdded(address indexed provider, address token1, address token2, uint256 amount1, uint256 amount2);
    }

    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address owner) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function allowance(address owner, address spender) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);

        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);
    }
}
